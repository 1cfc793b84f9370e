//! Date helper functions

use chrono::NaiveDate;
use std::fmt::Write;

/// Format a date using Moment.js-compatible format string.
/// Falls back to `YYYY-MM-DD` when the format cannot be rendered.
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2025-10-22"
/// ```
pub fn format_date(date: &NaiveDate, format: &str) -> String {
    let chrono_format = moment_to_chrono_format(format);
    let mut out = String::new();
    if write!(out, "{}", date.format(&chrono_format)).is_err() {
        return iso_date(date);
    }
    out
}

/// Format date in full format (like "October 22, 2025")
pub fn full_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a date as `YYYY-MM-DD`
pub fn iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first within each unit; lowercase tokens after uppercase
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("D", "%-d"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
