//! Front-matter parsing
//!
//! A post file starts with a YAML block fenced by `---` lines. The block is
//! decoded into an ordered [`FrontMatter`] map of [`FrontValue`]s; everything
//! after the closing fence is returned untouched as the body.

use chrono::NaiveDate;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

lazy_static! {
    /// YAML 1.1 timestamp: a date, optionally followed by a time and zone
    static ref TIMESTAMP_RE: Regex = Regex::new(
        r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}(?:(?:[Tt]|[ \t]+)[0-9]{1,2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]*)?(?:[ \t]*(?:Z|[-+][0-9]{1,2}(?::[0-9]{2})?))?)?$"
    )
    .unwrap();

    /// A top-level `key: value` or bare `key:` line (no indentation)
    static ref TOP_LEVEL_RE: Regex =
        Regex::new(r#"^([A-Za-z0-9_-]+|"(?:[^"\\]|\\.)*")[ \t]*:(?:[ \t]+(.*))?$"#).unwrap();

    /// An item of a block list
    static ref LIST_ITEM_RE: Regex = Regex::new(r"^([ \t]*)-[ \t]+(.*)$").unwrap();

    /// Keys that can be written without quoting
    static ref PLAIN_KEY_RE: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").unwrap();
}

const DELIMITER: &str = "---";

/// Errors raised while splitting or decoding a front-matter block
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front-matter block is missing its closing `---` line")]
    Unterminated,

    #[error("invalid YAML in front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front-matter must be a mapping of fields, found {0}")]
    NotAMapping(&'static str),

    #[error("front-matter keys must be text, found {0}")]
    NonTextKey(&'static str),
}

/// A decoded front-matter value
///
/// `Date` holds the raw text of an unquoted YAML timestamp. Quoted dates stay
/// `Text`, so downstream code can tell the two spellings apart without
/// re-reading the file.
#[derive(Debug, Clone, PartialEq)]
pub enum FrontValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Date(String),
    List(Vec<FrontValue>),
    Map(IndexMap<String, FrontValue>),
}

impl FrontValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FrontValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FrontValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FrontValue]> {
        match self {
            FrontValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Interpret a text or native date value as a calendar date.
    ///
    /// Only the leading `YYYY-MM-DD` part is considered, so a timestamp with
    /// a time component still yields its date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        let raw = match self {
            FrontValue::Text(s) | FrontValue::Date(s) => s.trim(),
            _ => return None,
        };
        let day = raw.split(['T', 't', ' ']).next().unwrap_or(raw);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            FrontValue::Null => "null",
            FrontValue::Bool(_) => "boolean",
            FrontValue::Integer(_) | FrontValue::Float(_) => "number",
            FrontValue::Text(_) => "string",
            FrontValue::Date(_) => "date",
            FrontValue::List(_) => "list",
            FrontValue::Map(_) => "mapping",
        }
    }

    fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            FrontValue::Null => Value::Null,
            FrontValue::Bool(b) => Value::Bool(*b),
            FrontValue::Integer(i) => Value::from(*i),
            FrontValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FrontValue::Text(s) | FrontValue::Date(s) => Value::String(s.clone()),
            FrontValue::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            FrontValue::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Render as a YAML flow value. Text is always quoted; a native date is not.
    fn to_yaml_flow(&self) -> String {
        match self {
            FrontValue::Date(raw) => raw.clone(),
            FrontValue::List(items) => {
                let items: Vec<String> = items.iter().map(Self::to_yaml_flow).collect();
                format!("[{}]", items.join(", "))
            }
            other => other.to_json().to_string(),
        }
    }

    fn from_yaml(value: serde_yaml::Value) -> Result<Self, FrontMatterError> {
        use serde_yaml::Value;
        Ok(match value {
            Value::Null => FrontValue::Null,
            Value::Bool(b) => FrontValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FrontValue::Integer(i),
                None => FrontValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => FrontValue::Text(s),
            Value::Sequence(items) => FrontValue::List(
                items
                    .into_iter()
                    .map(Self::from_yaml)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Mapping(mapping) => {
                let mut map = IndexMap::with_capacity(mapping.len());
                for (key, value) in mapping {
                    map.insert(yaml_key(key)?, Self::from_yaml(value)?);
                }
                FrontValue::Map(map)
            }
            Value::Tagged(tagged) => Self::from_yaml(tagged.value)?,
        })
    }
}

/// JSON-style rendering, used when quoting a value back to the author
impl fmt::Display for FrontValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// Decoded front-matter, in the order the fields were written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: IndexMap<String, FrontValue>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let (first, after_open) = split_line(content);
        if !is_delimiter(first) {
            return Ok((FrontMatter::new(), content));
        }

        let mut rest = after_open;
        let mut block_len = 0;
        loop {
            if rest.is_empty() {
                return Err(FrontMatterError::Unterminated);
            }
            let (line, next) = split_line(rest);
            if is_delimiter(line) {
                let fm = Self::decode(&after_open[..block_len])?;
                return Ok((fm, next));
            }
            block_len += rest.len() - next.len();
            rest = next;
        }
    }

    fn decode(yaml: &str) -> Result<Self, FrontMatterError> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::new());
        }

        let mapping = match serde_yaml::from_str::<serde_yaml::Value>(yaml)? {
            serde_yaml::Value::Mapping(mapping) => mapping,
            // A block holding only comments
            serde_yaml::Value::Null => return Ok(FrontMatter::new()),
            other => return Err(FrontMatterError::NotAMapping(yaml_kind(&other))),
        };

        let bare = BareTimestamps::scan(yaml);
        let mut fields = IndexMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            let key = yaml_key(key)?;
            let value = match value {
                serde_yaml::Value::String(raw) if bare.values.contains(&key) => {
                    FrontValue::Date(raw)
                }
                serde_yaml::Value::Sequence(items) => match bare.items.get(&key) {
                    Some(flags) if flags.len() == items.len() => FrontValue::List(
                        items
                            .into_iter()
                            .zip(flags)
                            .map(|(item, &is_bare)| match item {
                                serde_yaml::Value::String(raw) if is_bare => {
                                    Ok(FrontValue::Date(raw))
                                }
                                other => FrontValue::from_yaml(other),
                            })
                            .collect::<Result<_, _>>()?,
                    ),
                    _ => FrontValue::from_yaml(serde_yaml::Value::Sequence(items))?,
                },
                other => FrontValue::from_yaml(other)?,
            };
            fields.insert(key, value);
        }

        Ok(Self { fields })
    }

    pub fn get(&self, key: &str) -> Option<&FrontValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FrontValue) -> Option<FrontValue> {
        self.fields.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FrontValue)> {
        self.fields.iter()
    }

    /// Serialize back into a `---` fenced block, newline terminated.
    ///
    /// Parsing the result yields the same values: text stays quoted and
    /// native dates stay bare.
    pub fn to_yaml_block(&self) -> String {
        let mut out = String::from("---\n");
        for (key, value) in &self.fields {
            if is_plain_key(key) {
                out.push_str(key);
            } else {
                out.push_str(&serde_json::Value::String(key.clone()).to_string());
            }
            out.push_str(": ");
            out.push_str(&value.to_yaml_flow());
            out.push('\n');
        }
        out.push_str("---\n");
        out
    }
}

impl FromIterator<(String, FrontValue)> for FrontMatter {
    fn from_iter<I: IntoIterator<Item = (String, FrontValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Split off the first line, dropping its line terminator
fn split_line(s: &str) -> (&str, &str) {
    match s.find('\n') {
        Some(pos) => (s[..pos].trim_end_matches('\r'), &s[pos + 1..]),
        None => (s, ""),
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Where a block writes bare timestamps: as a whole top-level value, or as
/// items of a top-level list. serde_yaml hands both back as plain strings.
#[derive(Debug, Default)]
struct BareTimestamps {
    values: HashSet<String>,
    /// One flag per list item, in order
    items: HashMap<String, Vec<bool>>,
}

impl BareTimestamps {
    fn scan(yaml: &str) -> Self {
        let mut found = Self::default();
        // Key of the block list being read, and the indent of its items
        let mut open: Option<(String, Option<usize>)> = None;

        for line in yaml.lines() {
            if let Some(caps) = TOP_LEVEL_RE.captures(line) {
                let key = match caps[1].strip_prefix('"') {
                    Some(_) => serde_json::from_str(&caps[1]).unwrap_or_default(),
                    None => caps[1].to_string(),
                };
                let value = caps.get(2).map_or("", |m| strip_comment(m.as_str()));
                open = None;
                if value.is_empty() {
                    open = Some((key, None));
                } else if is_timestamp(value) {
                    found.values.insert(key);
                } else if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
                    // Quoted commas or nesting change the item count, which
                    // `decode` checks before trusting these flags
                    let flags = if inner.trim().is_empty() {
                        Vec::new()
                    } else {
                        inner.split(',').map(|item| is_timestamp(item.trim())).collect()
                    };
                    found.items.insert(key, flags);
                }
                continue;
            }

            let Some((key, indent)) = open.as_mut() else {
                continue;
            };
            if let Some(caps) = LIST_ITEM_RE.captures(line) {
                let width = caps[1].len();
                if *indent.get_or_insert(width) == width {
                    let flag = is_timestamp(strip_comment(&caps[2]));
                    found.items.entry(key.clone()).or_default().push(flag);
                }
            } else if !line.trim().is_empty() && !line.starts_with([' ', '\t']) {
                open = None;
            }
        }

        found
    }
}

fn strip_comment(value: &str) -> &str {
    if value.trim_start().starts_with('#') {
        return "";
    }
    match value.find(" #") {
        Some(pos) => value[..pos].trim(),
        None => value.trim(),
    }
}

fn is_timestamp(value: &str) -> bool {
    TIMESTAMP_RE.is_match(value)
}

/// A key can go unquoted only if YAML reads it back as the same text;
/// `null`, `true` and friends would resolve to other types.
fn is_plain_key(key: &str) -> bool {
    PLAIN_KEY_RE.is_match(key)
        && matches!(
            serde_yaml::from_str::<serde_yaml::Value>(key),
            Ok(serde_yaml::Value::String(ref s)) if s == key
        )
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, FrontMatterError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(FrontMatterError::NonTextKey(yaml_kind(&other))),
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a list",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: "Hello World"
date: "2025-10-25"
author: Jane
tags:
  - rust
  - aws
published: true
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("title"), Some(&FrontValue::Text("Hello World".into())));
        assert_eq!(fm.get("date"), Some(&FrontValue::Text("2025-10-25".into())));
        assert_eq!(fm.get("published"), Some(&FrontValue::Bool(true)));
        assert_eq!(
            fm.get("tags"),
            Some(&FrontValue::List(vec![
                FrontValue::Text("rust".into()),
                FrontValue::Text("aws".into()),
            ]))
        );
        assert_eq!(remaining, "\nThis is the content.\n");
    }

    #[test]
    fn test_field_order_preserved() {
        let content = "---\nzeta: 1\nalpha: 2\nmid: 3\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let keys: Vec<_> = fm.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_unquoted_date_is_native() {
        let content = "---\ndate: 2025-10-25\nupdated: 2025-10-26 10:30:00 # edited\n---\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("date"), Some(&FrontValue::Date("2025-10-25".into())));
        assert!(matches!(fm.get("updated"), Some(FrontValue::Date(_))));
    }

    #[test]
    fn test_unquoted_dates_in_lists() {
        let content = "---\nflow: [2025-01-01, \"2025-01-02\", x]\nblock:\n  - 2025-03-04 # first\n  - '2025-03-05'\ncommas: [\"a, b\", 2025-01-01]\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(
            fm.get("flow"),
            Some(&FrontValue::List(vec![
                FrontValue::Date("2025-01-01".into()),
                FrontValue::Text("2025-01-02".into()),
                FrontValue::Text("x".into()),
            ]))
        );
        assert_eq!(
            fm.get("block"),
            Some(&FrontValue::List(vec![
                FrontValue::Date("2025-03-04".into()),
                FrontValue::Text("2025-03-05".into()),
            ]))
        );
        // Item positions cannot be recovered past a quoted comma
        assert_eq!(
            fm.get("commas"),
            Some(&FrontValue::List(vec![
                FrontValue::Text("a, b".into()),
                FrontValue::Text("2025-01-01".into()),
            ]))
        );

        let (again, _) = FrontMatter::parse(&fm.to_yaml_block()).unwrap();
        assert_eq!(again.get("flow"), fm.get("flow"));
        assert_eq!(again.get("block"), fm.get("block"));
    }

    #[test]
    fn test_quoted_date_is_text() {
        let content = "---\ndate: '2025-10-25'\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("date"), Some(&FrontValue::Text("2025-10-25".into())));
    }

    #[test]
    fn test_as_date() {
        assert_eq!(
            FrontValue::Date("2025-03-01 08:00:00".into()).as_date(),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
        assert_eq!(
            FrontValue::Text("2025-03-01".into()).as_date(),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
        assert_eq!(FrontValue::Text("2025-02-30".into()).as_date(), None);
        assert_eq!(FrontValue::Integer(2025).as_date(), None);
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just a heading\n\nSome text.";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_empty_block() {
        let (fm, remaining) = FrontMatter::parse("---\n---\nBody").unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: \"Windows\"\r\n---\r\nBody\r\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("title").and_then(FrontValue::as_text), Some("Windows"));
        assert_eq!(remaining, "Body\r\n");
    }

    #[test]
    fn test_unterminated_block() {
        let err = FrontMatter::parse("---\ntitle: Oops\n\nNo closing fence").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = FrontMatter::parse("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_block_must_be_mapping() {
        let err = FrontMatter::parse("---\n- just\n- a list\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMapping(_)));
    }

    #[test]
    fn test_yaml_block_round_trip() {
        let content = r#"---
title: "Deploying with: colons"
date: "2025-10-25"
created: 2025-10-24
author: "Jane"
tags: ["bedrock", "true", "2025"]
published: false
---
Body text
"#;
        let (fm, body) = FrontMatter::parse(content).unwrap();
        let rendered = format!("{}{}", fm.to_yaml_block(), body);
        let (again, body_again) = FrontMatter::parse(&rendered).unwrap();
        assert_eq!(again, fm);
        assert_eq!(body_again, "Body text\n");
        assert!(rendered.contains("created: 2025-10-24\n"));
    }

    #[test]
    fn test_yaml_block_quotes_reserved_keys() {
        let content = "---\n\"null\": \"x\"\n\"True\": 1\n\"~\": 2\ntitle: \"T\"\n---\n";
        let (mut fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("null"), Some(&FrontValue::Text("x".into())));
        fm.insert("first draft", FrontValue::Date("2025-01-01".into()));

        let rendered = fm.to_yaml_block();
        assert!(rendered.contains("\"null\": \"x\"\n"));
        assert!(rendered.contains("title: \"T\"\n"));
        let (again, _) = FrontMatter::parse(&rendered).unwrap();
        assert_eq!(again, fm);
    }

    #[test]
    fn test_display_is_json_like() {
        assert_eq!(FrontValue::Text("x".into()).to_string(), "\"x\"");
        assert_eq!(
            FrontValue::List(vec![FrontValue::Integer(1), FrontValue::Null]).to_string(),
            "[1,null]"
        );
    }
}
