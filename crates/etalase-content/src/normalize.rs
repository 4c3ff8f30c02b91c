//! Metadata normalization applied to every loaded document.
//!
//! Two quirks of authored content are smoothed over here:
//!
//! - List widgets in the editing tool store entries as `{item: x}` or
//!   `{url: x}` objects. Lists are flattened to the bare values.
//! - Prices are often typed as display strings (`"Rp 85.000"`). Currency
//!   fields are reduced to their digits and parsed as integers; anything
//!   unparseable becomes `0` and is logged.

use serde_json::Value;

use crate::content_type::ContentType;
use crate::frontmatter::Metadata;

/// Keys of single-value wrapper objects, in lookup order.
const WRAPPER_KEYS: &[&str] = &["item", "url"];

/// Fields inside each `variants` entry treated as currency.
const VARIANT_CURRENCY_FIELDS: &[&str] = &["price", "stock"];

/// Normalize a document's metadata in place.
pub fn normalize_metadata(metadata: &mut Metadata, content_type: Option<ContentType>) {
    for value in metadata.values_mut() {
        flatten_wrappers(value);
    }

    let Some(content_type) = content_type else {
        return;
    };

    for field in content_type.currency_fields() {
        coerce_currency_field(metadata, field);
    }

    if content_type == ContentType::Products {
        if let Some(Value::Array(variants)) = metadata.get_mut("variants") {
            for variant in variants.iter_mut() {
                if let Value::Object(fields) = variant {
                    for field in VARIANT_CURRENCY_FIELDS {
                        coerce_currency_field(fields, field);
                    }
                }
            }
        }
    }
}

/// Replace wrapper objects inside lists with their wrapped scalar, at any depth.
pub fn flatten_wrappers(value: &mut Value) {
    match value {
        Value::Array(items) => {
            for item in items.iter_mut() {
                if let Some(inner) = unwrap_scalar(item) {
                    *item = inner;
                } else {
                    flatten_wrappers(item);
                }
            }
        }
        Value::Object(map) => {
            for inner in map.values_mut() {
                flatten_wrappers(inner);
            }
        }
        _ => {}
    }
}

fn unwrap_scalar(value: &Value) -> Option<Value> {
    let map = value.as_object()?;
    WRAPPER_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|inner| is_scalar(inner))
        .cloned()
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn coerce_currency_field(metadata: &mut Metadata, field: &str) {
    if let Some(value) = metadata.get_mut(field) {
        if value.is_null() {
            return;
        }
        *value = Value::from(parse_currency(value));
    }
}

/// Parse a currency-ish value into an integer amount.
///
/// Numbers pass through (fractions truncate). Strings keep only their ASCII
/// digits, so `"Rp 85.000"` is `85000`. Anything else, or a string without
/// digits, is `0`.
///
/// # Example
///
/// ```
/// use etalase_content::normalize::parse_currency;
/// use serde_json::json;
///
/// assert_eq!(parse_currency(&json!("Rp 85.000")), 85000);
/// assert_eq!(parse_currency(&json!("hubungi kami")), 0);
/// ```
pub fn parse_currency(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or_default(),
        Value::String(s) => parse_currency_str(s),
        Value::Null => 0,
        other => {
            log::warn!("expected a numeric value, found {other}; using 0");
            0
        }
    }
}

/// Strip non-digits from `raw` and parse the rest; `0` on failure.
pub fn parse_currency_str(raw: &str) -> i64 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    match digits.parse::<i64>() {
        Ok(n) => n,
        Err(_) => {
            log::warn!("could not parse '{raw}' as a number; using 0");
            0
        }
    }
}
