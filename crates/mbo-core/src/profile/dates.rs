//! Lenient date/time parsing for inbound profile records.

use chrono::{NaiveDate, NaiveTime};

use crate::errors::ValidationError;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const TIME_FORMATS: [&str; 3] = ["%H:%M", "%H:%M:%S", "%I:%M %p"];

/// Accepts `YYYY-MM-DD` and `MM/DD/YYYY`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ValidationError::InvalidDate {
            value: raw.to_string(),
            reason: "expected YYYY-MM-DD or MM/DD/YYYY".to_string(),
        })
}

/// Accepts `HH:MM`, `HH:MM:SS` and `HH:MM AM`.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_date_shapes_parse_to_the_same_day() {
        assert_eq!(parse_date("1985-07-14").unwrap(), parse_date("07/14/1985").unwrap());
        assert!(parse_date("14.07.1985").is_err());
    }

    #[test]
    fn times() {
        assert_eq!(parse_time("06:30"), NaiveTime::from_hms_opt(6, 30, 0));
        assert_eq!(parse_time("6:30 PM"), NaiveTime::from_hms_opt(18, 30, 0));
        assert_eq!(parse_time("noon"), None);
    }
}
