use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::YEAR_MONTH_FORMAT;

/// Missing value tokens
pub const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "na", "n/a", "NULL", "null", "NaN", "nan", ".", "-", "--", "None", "none",
    "#N/A",
];

// Plain or digit-grouped numbers: 1234, -12.5, 1,234, 12,34,567.00
static NUMERIC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(,\d+)*(\.\d+)?$").unwrap());

// Year-month layouts seen in source releases, with the day suffix each needs
// before parsing since chrono has no year-month type.
static YEAR_MONTH_PATTERNS: Lazy<Vec<(Regex, &'static str, &'static str)>> = Lazy::new(|| {
    vec![
        // 2020-05
        (Regex::new(r"^\d{4}-\d{1,2}$").unwrap(), "%Y-%m-%d", "-01"),
        // 2020-05-17 (day discarded)
        (Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").unwrap(), "%Y-%m-%d", ""),
        // 05/2020
        (Regex::new(r"^\d{1,2}/\d{4}$").unwrap(), "%m/%Y-%d", "-01"),
        // May-2020, January-2021
        (Regex::new(r"^[A-Za-z]{3,9}-\d{4}$").unwrap(), "%B-%Y-%d", "-01"),
        // May 2020
        (Regex::new(r"^[A-Za-z]{3,9} \d{4}$").unwrap(), "%B %Y-%d", "-01"),
    ]
});

/// Check if a value represents a missing value
pub fn is_missing(value: &str) -> bool {
    let trimmed = value.trim();
    MISSING_TOKENS.iter().any(|t| trimmed == *t)
}

/// Check if a value is a (possibly digit-grouped) number
pub fn is_numeric(value: &str) -> bool {
    NUMERIC_PATTERN.is_match(value.trim())
}

/// Coerce a raw cell: missing tokens become empty, numbers lose grouping
/// separators, everything else is trimmed.
pub fn coerce_value(value: &str) -> String {
    let trimmed = value.trim();
    if is_missing(trimmed) {
        String::new()
    } else if is_numeric(trimmed) {
        trimmed.replace(',', "")
    } else {
        trimmed.to_string()
    }
}

/// Parse a year-month value in any known source layout
pub fn parse_year_month(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    for (pattern, format, day) in YEAR_MONTH_PATTERNS.iter() {
        if !pattern.is_match(trimmed) {
            continue;
        }
        let candidate = format!("{}{}", trimmed, day);
        if let Ok(date) = NaiveDate::parse_from_str(&candidate, format) {
            return Some(date.with_day(1).unwrap_or(date));
        }
    }
    None
}

/// Render a date as `YYYY-MM`
pub fn format_year_month(date: NaiveDate) -> String {
    date.format(YEAR_MONTH_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_missing() {
        assert!(is_missing(""));
        assert!(is_missing("  "));
        assert!(is_missing("NA"));
        assert!(is_missing("-"));
        assert!(is_missing("#N/A"));
        assert!(!is_missing("0"));
        assert!(!is_missing("Kerala"));
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("42"));
        assert!(is_numeric("-3.14"));
        assert!(is_numeric("1,234"));
        assert!(is_numeric("12,34,567.00"));
        assert!(!is_numeric("abc"));
        assert!(!is_numeric("1,"));
        assert!(!is_numeric(""));
    }

    #[test]
    fn test_coerce_value() {
        assert_eq!(coerce_value(" 1,234 "), "1234");
        assert_eq!(coerce_value("12.5"), "12.5");
        assert_eq!(coerce_value("NA"), "");
        assert_eq!(coerce_value(" Andhra Pradesh "), "Andhra Pradesh");
    }

    #[test]
    fn test_parse_year_month_layouts() {
        let may = NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
        assert_eq!(parse_year_month("2020-05"), Some(may));
        assert_eq!(parse_year_month("2020-5"), Some(may));
        assert_eq!(parse_year_month("2020-05-17").map(format_year_month), Some("2020-05".to_string()));
        assert_eq!(parse_year_month("05/2020"), Some(may));
        assert_eq!(parse_year_month("May-2020"), Some(may));
        assert_eq!(parse_year_month("May 2020"), Some(may));
    }

    #[test]
    fn test_parse_year_month_rejects_garbage() {
        assert_eq!(parse_year_month("2020-13"), None);
        assert_eq!(parse_year_month("not a date"), None);
        assert_eq!(parse_year_month(""), None);
    }

    #[test]
    fn test_format_year_month() {
        let date = NaiveDate::from_ymd_opt(1947, 1, 1).unwrap();
        assert_eq!(format_year_month(date), "1947-01");
    }
}
