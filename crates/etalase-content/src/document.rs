//! The on-disk unit of content.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::frontmatter::{Metadata, ParsedDocument};
use crate::normalize::parse_currency;

/// One content file: its slug, frontmatter metadata, and markdown body.
///
/// No schema is enforced on `metadata`. The typed accessors below are
/// lenient: a field in an unexpected shape degrades to an empty or zero
/// value and a warning is logged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    /// Identifier derived from the file name.
    pub slug: String,
    /// Frontmatter fields.
    pub metadata: Metadata,
    /// Markdown body, possibly empty.
    pub body: String,
}

impl ContentDocument {
    /// Build a document from a parse result.
    pub fn from_parsed(slug: impl Into<String>, parsed: ParsedDocument) -> Self {
        Self {
            slug: slug.into(),
            metadata: parsed.metadata,
            body: parsed.body,
        }
    }

    /// Split back into a parser-level document.
    pub fn to_parsed(&self) -> ParsedDocument {
        ParsedDocument {
            metadata: self.metadata.clone(),
            body: self.body.clone(),
        }
    }

    /// Raw metadata value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// String field; numbers and booleans are rendered as text.
    pub fn str_field(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => None,
            other => {
                log::warn!(
                    "{}: field '{key}' should be text, found {other}; ignoring",
                    self.slug
                );
                None
            }
        }
    }

    /// First present, non-empty string field among `keys`.
    pub fn first_str(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.str_field(key))
            .find(|s| !s.trim().is_empty())
    }

    /// List of strings; scalars inside the list are rendered as text.
    pub fn list_field(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Bool(b) => Some(b.to_string()),
                    Value::Null => None,
                    other => {
                        log::warn!(
                            "{}: dropping non-scalar item {other} from list '{key}'",
                            self.slug
                        );
                        None
                    }
                })
                .collect(),
            Some(other) => {
                log::warn!(
                    "{}: field '{key}' should be a list, found {other}; using []",
                    self.slug
                );
                Vec::new()
            }
        }
    }

    /// Integer field with currency coercion.
    pub fn int_field(&self, key: &str) -> i64 {
        self.get(key).map(parse_currency).unwrap_or_default()
    }

    /// Optional integer field; absent or null stays `None`.
    pub fn opt_int_field(&self, key: &str) -> Option<i64> {
        match self.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(parse_currency(value)),
        }
    }

    /// Floating-point field; unparseable values are `0.0`.
    pub fn float_field(&self, key: &str) -> f64 {
        match self.get(key) {
            None | Some(Value::Null) => 0.0,
            Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
            Some(Value::String(s)) => s.trim().replace(',', ".").parse().unwrap_or_else(|_| {
                log::warn!("{}: field '{key}' is not a number ('{s}'); using 0", self.slug);
                0.0
            }),
            Some(other) => {
                log::warn!(
                    "{}: field '{key}' should be a number, found {other}; using 0",
                    self.slug
                );
                0.0
            }
        }
    }

    /// Boolean field; accepts `true`/`false` strings.
    pub fn bool_field(&self, key: &str) -> bool {
        match self.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("true") => true,
            Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("false") => false,
            Some(other) => {
                log::warn!(
                    "{}: field '{key}' should be a boolean, found {other}; using false",
                    self.slug
                );
                false
            }
        }
    }

    /// True when `key` holds `value` (compared as text).
    pub fn field_matches(&self, key: &str, value: &str) -> bool {
        if key == "slug" {
            return self.slug == value;
        }
        self.str_field(key).is_some_and(|s| s == value)
    }
}
