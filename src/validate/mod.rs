//! Front-matter validation
//!
//! The validator gates edits to post files. Unlike the loader, which is lenient
//! so a listing never breaks, it reports every rule a post breaks so the author
//! can fix them all in one pass.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

use crate::config::BlogConfig;
use crate::content::{FrontMatter, FrontValue};

lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap();
}

const DATE_EXAMPLE: &str = "Expected format: YYYY-MM-DD (e.g., \"2025-10-25\")";

/// One broken rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field name, with an index for list elements (`tags[2]`)
    pub field: String,
    pub message: String,
}

impl Violation {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}: {}", self.field, self.message)
    }
}

/// Checks post front-matter against the blog's schema
#[derive(Debug, Clone)]
pub struct FrontMatterValidator {
    allowed_categories: Vec<String>,
    max_tags: usize,
}

impl Default for FrontMatterValidator {
    fn default() -> Self {
        Self::from_config(&BlogConfig::default())
    }
}

impl FrontMatterValidator {
    pub fn new(allowed_categories: Vec<String>, max_tags: usize) -> Self {
        Self {
            allowed_categories,
            max_tags: max_tags.max(1),
        }
    }

    pub fn from_config(config: &BlogConfig) -> Self {
        Self::new(config.categories.clone(), config.max_tags)
    }

    pub fn allowed_categories(&self) -> &[String] {
        &self.allowed_categories
    }

    /// Every violation found; empty when the front-matter is valid
    pub fn validate(&self, fm: &FrontMatter) -> Vec<Violation> {
        let mut violations = Vec::new();
        check_required_text(fm, "title", &mut violations);
        check_date(fm, &mut violations);
        check_required_text(fm, "author", &mut violations);
        self.check_category(fm, &mut violations);
        self.check_tags(fm, &mut violations);
        check_published(fm, &mut violations);
        check_excerpt(fm, &mut violations);
        violations
    }

    fn check_category(&self, fm: &FrontMatter, out: &mut Vec<Violation>) {
        let allowed = self.allowed_categories.join(", ");
        match fm.get("category") {
            None | Some(FrontValue::Null) => out.push(Violation::new(
                "category",
                format!("Required field missing. Allowed values: {}", allowed),
            )),
            Some(FrontValue::Text(s)) if self.allowed_categories.iter().any(|c| c == s) => {}
            Some(FrontValue::Text(s)) if s.is_empty() => out.push(Violation::new(
                "category",
                format!("Required field missing. Allowed values: {}", allowed),
            )),
            Some(other) => out.push(Violation::new(
                "category",
                format!("Invalid value {}. Allowed values: {}", other, allowed),
            )),
        }
    }

    fn check_tags(&self, fm: &FrontMatter, out: &mut Vec<Violation>) {
        let tags = match fm.get("tags") {
            None | Some(FrontValue::Null) => {
                out.push(Violation::new(
                    "tags",
                    format!(
                        "Required field missing. Expected array with 1-{} items (e.g., [\"tag1\", \"tag2\"])",
                        self.max_tags
                    ),
                ));
                return;
            }
            Some(FrontValue::List(tags)) => tags,
            Some(other) => {
                out.push(Violation::new(
                    "tags",
                    format!("Must be an array. Current value: {}", other),
                ));
                return;
            }
        };

        if tags.is_empty() {
            out.push(Violation::new(
                "tags",
                "Array must contain at least 1 tag. Current count: 0",
            ));
        } else if tags.len() > self.max_tags {
            out.push(Violation::new(
                "tags",
                format!(
                    "Array must contain at most {} tags. Current count: {}",
                    self.max_tags,
                    tags.len()
                ),
            ));
        } else {
            for (index, tag) in tags.iter().enumerate() {
                if !is_non_blank_text(tag) {
                    out.push(Violation::new(
                        format!("tags[{}]", index),
                        format!("Must be a non-empty string. Current value: {}", tag),
                    ));
                }
            }
        }
    }
}

fn is_non_blank_text(value: &FrontValue) -> bool {
    matches!(value, FrontValue::Text(s) if !s.trim().is_empty())
}

fn describe(value: Option<&FrontValue>) -> String {
    value.map_or_else(|| "missing".to_string(), ToString::to_string)
}

fn check_required_text(fm: &FrontMatter, field: &str, out: &mut Vec<Violation>) {
    let value = fm.get(field);
    if !value.is_some_and(is_non_blank_text) {
        out.push(Violation::new(
            field,
            format!("Required non-empty string. Current value: {}", describe(value)),
        ));
    }
}

fn check_date(fm: &FrontMatter, out: &mut Vec<Violation>) {
    let raw = match fm.get("date") {
        None | Some(FrontValue::Null) => {
            out.push(Violation::new(
                "date",
                format!("Required field missing. {}", DATE_EXAMPLE),
            ));
            return;
        }
        Some(FrontValue::Text(s)) if s.is_empty() => {
            out.push(Violation::new(
                "date",
                format!("Required field missing. {}", DATE_EXAMPLE),
            ));
            return;
        }
        Some(FrontValue::Text(s)) => s.as_str(),
        // Unquoted dates are rejected even when the date itself is fine
        Some(FrontValue::Date(raw)) => {
            out.push(Violation::new(
                "date",
                "Date should be a quoted string in YYYY-MM-DD format. Example: date: \"2025-10-25\" (note the quotes)",
            ));
            raw.as_str()
        }
        Some(other) => {
            out.push(Violation::new(
                "date",
                format!("Invalid format. Current value: {}. {}", other, DATE_EXAMPLE),
            ));
            return;
        }
    };

    if !DATE_RE.is_match(raw) {
        out.push(Violation::new(
            "date",
            format!("Invalid format. Current value: {:?}. {}", raw, DATE_EXAMPLE),
        ));
        return;
    }

    // DATE_RE guarantees ASCII digits at these offsets
    let (Ok(year), Ok(month), Ok(day)) = (
        raw[0..4].parse::<i32>(),
        raw[5..7].parse::<u32>(),
        raw[8..10].parse::<u32>(),
    ) else {
        out.push(Violation::new(
            "date",
            format!("Invalid format. Current value: {:?}. {}", raw, DATE_EXAMPLE),
        ));
        return;
    };

    if !(1..=12).contains(&month) {
        out.push(Violation::new(
            "date",
            format!(
                "Invalid month. Current value: {:?}. Month must be between 01 and 12",
                raw
            ),
        ));
    } else if !(1..=31).contains(&day) {
        out.push(Violation::new(
            "date",
            format!(
                "Invalid day. Current value: {:?}. Day must be between 01 and 31",
                raw
            ),
        ));
    } else if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        out.push(Violation::new(
            "date",
            format!(
                "Invalid date. Current value: {:?}. Please use a valid date in YYYY-MM-DD format",
                raw
            ),
        ));
    }
}

fn check_published(fm: &FrontMatter, out: &mut Vec<Violation>) {
    match fm.get("published") {
        None | Some(FrontValue::Bool(_)) => {}
        Some(other) => out.push(Violation::new(
            "published",
            format!("Must be a boolean (true or false). Current value: {}", other),
        )),
    }
}

fn check_excerpt(fm: &FrontMatter, out: &mut Vec<Violation>) {
    match fm.get("excerpt") {
        None => {}
        Some(value) if is_non_blank_text(value) => {}
        Some(other) => out.push(Violation::new(
            "excerpt",
            format!(
                "If provided, must be a non-empty string. Current value: {}",
                other
            ),
        )),
    }
}
