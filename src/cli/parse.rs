use chrono::NaiveDate;

use cardmatch_core::model::{validate_level, ProjectStatus, SkillLevel};

/// Parse `<tech-id>=<level>`
pub fn parse_skill_level(s: &str) -> std::result::Result<SkillLevel, String> {
    s.parse::<SkillLevel>().map_err(|e| e.to_string())
}

/// Parse a trait or demand level (1-10)
pub fn parse_level(s: &str) -> std::result::Result<u8, String> {
    let level = s
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("'{}' is not a level (expected 1-10)", s))?;
    validate_level("level", level).map_err(|e| e.to_string())
}

/// Parse project status (waiting, in-progress, finished)
pub fn parse_status(s: &str) -> std::result::Result<ProjectStatus, String> {
    s.parse::<ProjectStatus>().map_err(|e| e.to_string())
}

/// Parse a calendar date (YYYY-MM-DD)
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}' (expected YYYY-MM-DD): {}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_bounds() {
        assert_eq!(parse_level("1"), Ok(1));
        assert_eq!(parse_level("10"), Ok(10));
        assert!(parse_level("0").is_err());
        assert!(parse_level("11").is_err());
        assert!(parse_level("high").is_err());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("in-progress"), Ok(ProjectStatus::InProgress));
        assert_eq!(parse_status("F"), Ok(ProjectStatus::Finished));
        assert!(parse_status("paused").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-03-01"),
            Ok(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
        );
        assert!(parse_date("03/01/2026").is_err());
    }
}
