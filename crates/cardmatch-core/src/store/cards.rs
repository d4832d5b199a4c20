use chrono::Utc;

use super::Store;
use crate::db::{self, cards, technologies};
use crate::error::{MatchError, Result};
use crate::lock;
use crate::model::{Card, CardId, CardUpdate, NewCard};

impl Store {
    #[tracing::instrument(skip(self, card), fields(name = %card.name))]
    pub fn create_card(&self, owner_id: &str, card: &NewCard) -> Result<Card> {
        card.validate()?;

        let tx = self.db.write_tx()?;
        technologies::ensure_known(&tx, &card.levels)?;
        let id = cards::insert(&tx, owner_id, card, Utc::now())?;
        let created =
            cards::find_owned(&tx, owner_id, id)?.ok_or_else(|| MatchError::not_found("card", id))?;
        db::commit(tx, "card creation")?;

        tracing::info!(card_id = id, "card created");
        Ok(created)
    }

    pub fn get_card(&self, owner_id: &str, id: CardId) -> Result<Card> {
        let tx = self.db.read_tx()?;
        cards::find_owned(&tx, owner_id, id)?.ok_or_else(|| MatchError::not_found("card", id))
    }

    /// The owner's cards; with `available_only`, just those not in an assignment
    pub fn list_cards(&self, owner_id: &str, available_only: bool) -> Result<Vec<Card>> {
        let tx = self.db.read_tx()?;
        cards::list(&tx, owner_id, available_only)
    }

    #[tracing::instrument(skip(self, update))]
    pub fn update_card(&self, owner_id: &str, id: CardId, update: &CardUpdate) -> Result<Card> {
        if update.is_empty() {
            return Err(MatchError::EmptyUpdate {
                entity: "card".to_string(),
                id,
            });
        }

        let tx = self.db.write_tx()?;
        let current =
            cards::find_owned(&tx, owner_id, id)?.ok_or_else(|| MatchError::not_found("card", id))?;
        lock::check_card_update(&current)?;

        let updated = update.apply_to(&current)?;
        if let Some(levels) = &update.levels {
            technologies::ensure_known(&tx, levels)?;
        }
        cards::update(&tx, &updated, update.levels.is_some())?;
        db::commit(tx, "card update")?;

        tracing::info!(card_id = id, "card updated");
        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    pub fn delete_card(&self, owner_id: &str, id: CardId) -> Result<()> {
        let tx = self.db.write_tx()?;
        let current =
            cards::find_owned(&tx, owner_id, id)?.ok_or_else(|| MatchError::not_found("card", id))?;
        lock::check_card_delete(&current)?;

        if !cards::delete(&tx, owner_id, id)? {
            return Err(MatchError::not_found("card", id));
        }
        db::commit(tx, "card deletion")?;

        tracing::info!(card_id = id, "card deleted");
        Ok(())
    }
}
