//! Card subcommands

use clap::{Args, Subcommand};

use super::parse::{parse_level, parse_skill_level};
use cardmatch_core::model::{CardId, SkillLevel};

#[derive(Subcommand, Debug)]
pub enum CardCommands {
    /// Create a card
    Create(CardCreateArgs),

    /// List your cards
    List {
        /// Only cards not in an assignment
        #[arg(long)]
        available: bool,
    },

    /// Show a card with its proficiencies
    Show { id: CardId },

    /// Update an unmatched card
    Update(CardUpdateArgs),

    /// Delete an unmatched card
    Delete { id: CardId },
}

/// Arguments for `card create`
#[derive(Args, Debug)]
pub struct CardCreateArgs {
    pub name: String,

    /// External document identifier
    #[arg(long, default_value = "")]
    pub document_id: String,

    /// Card category
    #[arg(long = "type", default_value = "general")]
    pub card_type: String,

    /// Social trait (1-10)
    #[arg(long, default_value = "5", value_parser = parse_level)]
    pub social: u8,

    /// Wisdom trait (1-10)
    #[arg(long, default_value = "5", value_parser = parse_level)]
    pub wisdom: u8,

    /// Speed trait (1-10)
    #[arg(long, default_value = "5", value_parser = parse_level)]
    pub speed: u8,

    /// Proficiency, `<tech-id>=<level>` (repeatable)
    #[arg(long, value_parser = parse_skill_level, action = clap::ArgAction::Append)]
    pub level: Vec<SkillLevel>,
}

/// Arguments for `card update`
#[derive(Args, Debug)]
pub struct CardUpdateArgs {
    pub id: CardId,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub document_id: Option<String>,

    #[arg(long = "type")]
    pub card_type: Option<String>,

    #[arg(long, value_parser = parse_level)]
    pub social: Option<u8>,

    #[arg(long, value_parser = parse_level)]
    pub wisdom: Option<u8>,

    #[arg(long, value_parser = parse_level)]
    pub speed: Option<u8>,

    /// Replace every proficiency, `<tech-id>=<level>` (repeatable)
    #[arg(long, value_parser = parse_skill_level, action = clap::ArgAction::Append)]
    pub level: Vec<SkillLevel>,
}
