//! Frontmatter parsing.
//!
//! A content document is an optional metadata block fenced by `---` lines
//! followed by free-form markdown:
//!
//! ```text
//! ---
//! name: Kaos Polos
//! price: "Rp 85.000"
//! ---
//! Bahan katun combed 30s.
//! ```
//!
//! The repository only talks to the [`FrontmatterParser`] trait, so any
//! parser honouring the round-trip contract can be substituted for the
//! bundled [`YamlFrontmatter`].

use etalase_core::{Error, Result};
use serde_json::Value;

/// Document metadata: an insertion-ordered, JSON-compatible mapping.
pub type Metadata = serde_json::Map<String, Value>;

const FENCE: &str = "---";

/// A document split into metadata and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    /// Frontmatter key/value pairs.
    pub metadata: Metadata,
    /// Markdown body following the frontmatter block.
    pub body: String,
}

/// Splits raw document text into metadata and body, and back.
///
/// Implementations must round-trip: `parse(stringify(parse(x)))` yields the
/// same metadata and body as `parse(x)`.
pub trait FrontmatterParser: Send + Sync {
    /// Parse raw document text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for a malformed metadata block.
    fn parse(&self, raw: &str) -> Result<ParsedDocument>;

    /// Serialize a document back to raw text.
    fn stringify(&self, document: &ParsedDocument) -> Result<String>;
}

/// YAML frontmatter between `---` fences.
///
/// JSON objects are valid YAML, so JSON metadata blocks parse as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFrontmatter;

impl FrontmatterParser for YamlFrontmatter {
    fn parse(&self, raw: &str) -> Result<ParsedDocument> {
        let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
        let text = text.replace("\r\n", "\n");

        let Some((block, body)) = split_fenced(&text)? else {
            return Ok(ParsedDocument {
                metadata: Metadata::new(),
                body: text,
            });
        };

        let metadata = if block.trim().is_empty() {
            Metadata::new()
        } else {
            match serde_yaml::from_str::<Value>(block) {
                Ok(Value::Object(map)) => map,
                Ok(Value::Null) => Metadata::new(),
                Ok(other) => {
                    return Err(Error::invalid_data(format!(
                        "frontmatter must be a mapping, found {}",
                        value_kind(&other)
                    )));
                }
                Err(e) => return Err(Error::invalid_data(format!("invalid YAML: {e}"))),
            }
        };

        Ok(ParsedDocument {
            metadata,
            body: body.to_string(),
        })
    }

    fn stringify(&self, document: &ParsedDocument) -> Result<String> {
        let yaml = serde_yaml::to_string(&document.metadata)
            .map_err(|e| Error::serialization(e.to_string()))?;
        Ok(format!("{FENCE}\n{yaml}{FENCE}\n{}", document.body))
    }
}

/// Split off a leading fenced block.
///
/// Returns `None` when the text does not open with a fence line.
fn split_fenced(text: &str) -> Result<Option<(&str, &str)>> {
    let Some(first_end) = text.find('\n') else {
        return Ok(None);
    };
    if text[..first_end].trim_end() != FENCE {
        return Ok(None);
    }

    let block_start = first_end + 1;
    let mut offset = block_start;
    for line in text[block_start..].split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let block = &text[block_start..offset];
            let body = &text[offset + line.len()..];
            return Ok(Some((block, body)));
        }
        offset += line.len();
    }

    Err(Error::invalid_data("unterminated frontmatter block"))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
