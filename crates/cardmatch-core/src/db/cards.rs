//! Card queries, scoped by owner except for assignment bookkeeping

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row, Transaction};

use crate::error::Result;
use crate::map_db_err;
use crate::model::{AssignmentId, Card, CardId, NewCard, SkillLevel};

const SELECT_CARD: &str = "SELECT id, owner_id, name, document_id, card_type, social, wisdom,
        speed, created_at, assignment_id
     FROM cards";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        document_id: row.get(3)?,
        card_type: row.get(4)?,
        social: row.get(5)?,
        wisdom: row.get(6)?,
        speed: row.get(7)?,
        created_at: row.get(8)?,
        levels: Vec::new(),
        assignment_id: row.get(9)?,
    })
}

fn load_levels(tx: &Transaction<'_>, card_id: CardId) -> Result<Vec<SkillLevel>> {
    let mut stmt = tx
        .prepare("SELECT tech_id, level FROM card_levels WHERE card_id = ?1 ORDER BY tech_id")
        .map_err(map_db_err!("prepare card levels query"))?;
    let rows = stmt
        .query_map(params![card_id], |r| {
            Ok(SkillLevel {
                tech_id: r.get(0)?,
                level: r.get(1)?,
            })
        })
        .map_err(map_db_err!("read card levels"))?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(map_db_err!("read card level row"))
}

fn write_levels(tx: &Transaction<'_>, card_id: CardId, levels: &[SkillLevel]) -> Result<()> {
    tx.execute("DELETE FROM card_levels WHERE card_id = ?1", params![card_id])
        .map_err(map_db_err!("clear card levels"))?;

    for level in levels {
        tx.execute(
            "INSERT INTO card_levels (card_id, tech_id, level) VALUES (?1, ?2, ?3)",
            params![card_id, level.tech_id, level.level],
        )
        .map_err(map_db_err!("insert card level"))?;
    }
    Ok(())
}

fn query_cards(
    tx: &Transaction<'_>,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Card>> {
    let cards = {
        let mut stmt = tx.prepare(sql).map_err(map_db_err!("prepare card query"))?;
        let rows = stmt
            .query_map(params, from_row)
            .map_err(map_db_err!("query cards"))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_db_err!("read card row"))?
    };

    cards
        .into_iter()
        .map(|mut c| {
            c.levels = load_levels(tx, c.id)?;
            Ok(c)
        })
        .collect()
}

pub fn insert(
    tx: &Transaction<'_>,
    owner_id: &str,
    card: &NewCard,
    created_at: DateTime<Utc>,
) -> Result<CardId> {
    tx.execute(
        "INSERT INTO cards (owner_id, name, document_id, card_type, social, wisdom, speed, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            owner_id,
            card.name,
            card.document_id,
            card.card_type,
            card.social,
            card.wisdom,
            card.speed,
            created_at,
        ],
    )
    .map_err(map_db_err!("insert card"))?;

    let id = tx.last_insert_rowid();
    write_levels(tx, id, &card.levels)?;
    Ok(id)
}

pub fn find_owned(tx: &Transaction<'_>, owner_id: &str, id: CardId) -> Result<Option<Card>> {
    let card = tx
        .query_row(
            &format!("{} WHERE id = ?1 AND owner_id = ?2", SELECT_CARD),
            params![id, owner_id],
            from_row,
        )
        .optional()
        .map_err(map_db_err!("read card"))?;

    match card {
        Some(mut c) => {
            c.levels = load_levels(tx, c.id)?;
            Ok(Some(c))
        }
        None => Ok(None),
    }
}

/// All of an owner's cards, or only those not in an assignment
pub fn list(tx: &Transaction<'_>, owner_id: &str, available_only: bool) -> Result<Vec<Card>> {
    let sql = if available_only {
        format!(
            "{} WHERE owner_id = ?1 AND assignment_id IS NULL ORDER BY id",
            SELECT_CARD
        )
    } else {
        format!("{} WHERE owner_id = ?1 ORDER BY id", SELECT_CARD)
    };
    query_cards(tx, &sql, params![owner_id])
}

pub fn list_by_assignment(tx: &Transaction<'_>, assignment_id: AssignmentId) -> Result<Vec<Card>> {
    query_cards(
        tx,
        &format!("{} WHERE assignment_id = ?1 ORDER BY id", SELECT_CARD),
        params![assignment_id],
    )
}

/// Persist every field of an already-validated card
pub fn update(tx: &Transaction<'_>, card: &Card, replace_levels: bool) -> Result<()> {
    tx.execute(
        "UPDATE cards SET name = ?1, document_id = ?2, card_type = ?3, social = ?4,
            wisdom = ?5, speed = ?6
         WHERE id = ?7 AND owner_id = ?8",
        params![
            card.name,
            card.document_id,
            card.card_type,
            card.social,
            card.wisdom,
            card.speed,
            card.id,
            card.owner_id,
        ],
    )
    .map_err(map_db_err!("update card"))?;

    if replace_levels {
        write_levels(tx, card.id, &card.levels)?;
    }
    Ok(())
}

pub fn delete(tx: &Transaction<'_>, owner_id: &str, id: CardId) -> Result<bool> {
    let affected = tx
        .execute(
            "DELETE FROM cards WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )
        .map_err(map_db_err!("delete card"))?;
    Ok(affected > 0)
}

/// Point an unassigned card at `assignment_id`.
///
/// Returns false if the card already had an assignment reference, leaving it untouched.
pub fn assign(tx: &Transaction<'_>, card_id: CardId, assignment_id: AssignmentId) -> Result<bool> {
    let affected = tx
        .execute(
            "UPDATE cards SET assignment_id = ?1 WHERE id = ?2 AND assignment_id IS NULL",
            params![assignment_id, card_id],
        )
        .map_err(map_db_err!("assign card"))?;
    Ok(affected == 1)
}

/// Assignment currently referencing the card, if any
pub fn holder(tx: &Transaction<'_>, card_id: CardId) -> Result<Option<AssignmentId>> {
    tx.query_row(
        "SELECT assignment_id FROM cards WHERE id = ?1",
        params![card_id],
        |r| r.get::<_, Option<AssignmentId>>(0),
    )
    .optional()
    .map(Option::flatten)
    .map_err(map_db_err!("read card assignment"))
}

/// Clear the assignment reference on every card pointing at `assignment_id`
pub fn release_assignment(tx: &Transaction<'_>, assignment_id: AssignmentId) -> Result<usize> {
    tx.execute(
        "UPDATE cards SET assignment_id = NULL WHERE assignment_id = ?1",
        params![assignment_id],
    )
    .map_err(map_db_err!("release cards"))
}
