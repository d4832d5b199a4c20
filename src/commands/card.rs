//! `cardmatch card` - card management

use cardmatch_core::error::Result;
use cardmatch_core::model::{Card, CardId, CardUpdate, NewCard};
use cardmatch_core::store::Store;

use super::output::{format_levels, print_json};
use crate::cli::card::{CardCreateArgs, CardUpdateArgs};
use crate::cli::{Cli, OutputFormat};

pub(crate) fn print_summary(card: &Card) {
    let lock = match card.assignment_id {
        Some(a) => format!("  [assignment {}]", a),
        None => String::new(),
    };
    println!(
        "{:>4}  {}  social={} wisdom={} speed={}  {}{}",
        card.id,
        card.name,
        card.social,
        card.wisdom,
        card.speed,
        format_levels(&card.levels),
        lock
    );
}

fn print_card(cli: &Cli, card: &Card) -> Result<()> {
    match cli.format {
        OutputFormat::Json => print_json(card),
        OutputFormat::Human => {
            println!("Card {}: {}", card.id, card.name);
            println!("  document:     {}", card.document_id);
            println!("  type:         {}", card.card_type);
            println!("  social:       {}", card.social);
            println!("  wisdom:       {}", card.wisdom);
            println!("  speed:        {}", card.speed);
            println!("  technologies: {}", format_levels(&card.levels));
            match card.assignment_id {
                Some(a) => println!("  assignment:   {} (locked)", a),
                None => println!("  assignment:   -"),
            }
            Ok(())
        }
    }
}

pub fn create(cli: &Cli, store: &Store, owner: &str, args: &CardCreateArgs) -> Result<()> {
    let card = store.create_card(
        owner,
        &NewCard {
            name: args.name.clone(),
            document_id: args.document_id.clone(),
            card_type: args.card_type.clone(),
            social: args.social,
            wisdom: args.wisdom,
            speed: args.speed,
            levels: args.level.clone(),
        },
    )?;

    match cli.format {
        OutputFormat::Json => print_json(&card),
        OutputFormat::Human => {
            println!("{}", card.id);
            if !cli.quiet {
                println!("Created card {}", card.name);
            }
            Ok(())
        }
    }
}

pub fn list(cli: &Cli, store: &Store, owner: &str, available: bool) -> Result<()> {
    let cards = store.list_cards(owner, available)?;
    match cli.format {
        OutputFormat::Json => print_json(&cards),
        OutputFormat::Human => {
            if cards.is_empty() && !cli.quiet {
                println!("No cards");
            }
            cards.iter().for_each(print_summary);
            Ok(())
        }
    }
}

pub fn show(cli: &Cli, store: &Store, owner: &str, id: CardId) -> Result<()> {
    let card = store.get_card(owner, id)?;
    print_card(cli, &card)
}

pub fn update(cli: &Cli, store: &Store, owner: &str, args: &CardUpdateArgs) -> Result<()> {
    let update = CardUpdate {
        name: args.name.clone(),
        document_id: args.document_id.clone(),
        card_type: args.card_type.clone(),
        social: args.social,
        wisdom: args.wisdom,
        speed: args.speed,
        levels: (!args.level.is_empty()).then(|| args.level.clone()),
    };
    let card = store.update_card(owner, args.id, &update)?;
    print_card(cli, &card)
}

pub fn delete(cli: &Cli, store: &Store, owner: &str, id: CardId) -> Result<()> {
    store.delete_card(owner, id)?;
    match cli.format {
        OutputFormat::Json => print_json(&serde_json::json!({ "deleted": id })),
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Deleted card {}", id);
            }
            Ok(())
        }
    }
}
