//! CLI commands for cardmatch

pub mod card;
pub mod dispatch;
pub mod init;
pub mod matching;
pub mod output;
pub mod project;
pub mod tech;
