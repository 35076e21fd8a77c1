//! Display formatting for employee date fields.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

/// Placeholder shown for absent values on the payslip.
pub const EMPTY_DISPLAY: &str = "-";

/// Free-form layouts tried after the ISO prefix check, month-first before
/// day-first to match how browsers read slashed dates.
const FREE_FORM_LAYOUTS: &[&str] = &[
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

fn iso_prefix() -> &'static Regex {
    static ISO_PREFIX: OnceLock<Regex> = OnceLock::new();
    ISO_PREFIX.get_or_init(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})").unwrap())
}

/// Formats a stored date string as `DD-MM-YYYY`.
///
/// Strings starting with `YYYY-MM-DD` are reordered digit-for-digit. Other
/// recognisable dates are parsed; anything else passes through unchanged.
/// Empty or absent values render as `-`.
///
/// # Examples
///
/// ```
/// use payslip_engine::format::format_dmy;
///
/// assert_eq!(format_dmy(Some("1990-05-07")), "07-05-1990");
/// assert_eq!(format_dmy(Some("1990-05-07T10:30:00Z")), "07-05-1990");
/// assert_eq!(format_dmy(Some("May 7, 1990")), "07-05-1990");
/// assert_eq!(format_dmy(Some("not a date")), "not a date");
/// assert_eq!(format_dmy(Some("")), "-");
/// assert_eq!(format_dmy(None), "-");
/// ```
pub fn format_dmy(value: Option<&str>) -> String {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return EMPTY_DISPLAY.to_string();
    };

    if let Some(caps) = iso_prefix().captures(value) {
        return format!("{}-{}-{}", &caps[3], &caps[2], &caps[1]);
    }

    match parse_free_form(value.trim()) {
        Some(date) => date.format("%d-%m-%Y").to_string(),
        None => value.to_string(),
    }
}

fn parse_free_form(value: &str) -> Option<NaiveDate> {
    if let Ok(datetime) = DateTime::parse_from_rfc2822(value) {
        return Some(datetime.date_naive());
    }

    FREE_FORM_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(value, layout).ok())
}
