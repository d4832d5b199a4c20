//! Shared rendering helpers

use serde::Serialize;

use cardmatch_core::error::Result;
use cardmatch_core::model::SkillLevel;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `1=8, 2=6`, or `-` when empty
pub fn format_levels(levels: &[SkillLevel]) -> String {
    if levels.is_empty() {
        return "-".to_string();
    }
    levels
        .iter()
        .map(|l| format!("{}={}", l.tech_id, l.level))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_percentage(percentage: f64) -> String {
    format!("{:.2}%", percentage)
}
