//! Post model

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use super::frontmatter::{FrontMatter, FrontValue};
use super::reading_time;

/// A front-matter field that cannot be turned into a [`Post`] field
#[derive(Error, Debug, PartialEq)]
pub enum FieldError {
    #[error("missing required field `{0}`")]
    Missing(&'static str),

    #[error("field `{field}` must be {expected}, found {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("field `date` is not a YYYY-MM-DD calendar date: {0}")]
    BadDate(String),
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// File name without extension
    pub slug: String,

    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    pub author: String,

    /// Summary shown in listings (empty when not set)
    pub excerpt: String,

    pub category: String,

    pub tags: Vec<String>,

    /// Posts are hidden unless explicitly published
    pub published: bool,

    /// Raw markup after the front-matter block
    pub content: String,
}

impl Post {
    /// Build a post from decoded front-matter and the body that followed it
    pub fn from_front_matter(slug: &str, fm: &FrontMatter, body: &str) -> Result<Self, FieldError> {
        let date = match fm.get("date") {
            None | Some(FrontValue::Null) => return Err(FieldError::Missing("date")),
            Some(value) => value
                .as_date()
                .ok_or_else(|| FieldError::BadDate(value.to_string()))?,
        };

        Ok(Self {
            slug: slug.to_string(),
            title: required_text(fm, "title")?,
            date,
            author: required_text(fm, "author")?,
            excerpt: optional_text(fm, "excerpt")?.unwrap_or_default(),
            category: required_text(fm, "category")?,
            tags: text_list(fm, "tags")?,
            published: match fm.get("published") {
                None | Some(FrontValue::Null) => false,
                Some(FrontValue::Bool(b)) => *b,
                Some(other) => return Err(wrong_type("published", "a boolean", other)),
            },
            content: body.to_string(),
        })
    }

    /// Estimated minutes to read the body
    pub fn reading_time(&self) -> u32 {
        reading_time::estimate(&self.content)
    }

    /// Case-insensitive category match
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// Case-insensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

fn wrong_type(field: &'static str, expected: &'static str, found: &FrontValue) -> FieldError {
    FieldError::WrongType {
        field,
        expected,
        found: found.kind(),
    }
}

fn required_text(fm: &FrontMatter, field: &'static str) -> Result<String, FieldError> {
    optional_text(fm, field)?.ok_or(FieldError::Missing(field))
}

fn optional_text(fm: &FrontMatter, field: &'static str) -> Result<Option<String>, FieldError> {
    match fm.get(field) {
        None | Some(FrontValue::Null) => Ok(None),
        Some(FrontValue::Text(s)) => Ok(Some(s.clone())),
        Some(other) => Err(wrong_type(field, "a string", other)),
    }
}

/// A list of strings, or a single string standing for a one-element list
fn text_list(fm: &FrontMatter, field: &'static str) -> Result<Vec<String>, FieldError> {
    match fm.get(field) {
        None | Some(FrontValue::Null) => Ok(Vec::new()),
        Some(FrontValue::Text(s)) => Ok(vec![s.clone()]),
        Some(FrontValue::List(items)) => items
            .iter()
            .map(|item| match item {
                FrontValue::Text(s) | FrontValue::Date(s) => Ok(s.clone()),
                other => Err(wrong_type(field, "a list of strings", other)),
            })
            .collect(),
        Some(other) => Err(wrong_type(field, "a list of strings", other)),
    }
}
