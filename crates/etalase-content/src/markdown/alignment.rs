//! Text alignment wrappers for rendered HTML.

use serde::{Deserialize, Serialize};

/// Horizontal alignment of a rendered block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Parse an alignment name, falling back to [`Alignment::Left`].
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("center") => Self::Center,
            Some("right") => Self::Right,
            Some("justify") => Self::Justify,
            _ => Self::Left,
        }
    }

    /// CSS class for this alignment.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Left => "text-left",
            Self::Center => "text-center",
            Self::Right => "text-right",
            Self::Justify => "text-justify",
        }
    }
}

/// Wrap `html` in a container carrying the alignment class.
///
/// Unknown or absent alignment names wrap with the left class.
///
/// # Example
///
/// ```
/// use etalase_content::markdown::apply_alignment;
///
/// assert_eq!(
///     apply_alignment("<p>Hi</p>", Some("center")),
///     "<div class=\"text-center\"><p>Hi</p></div>"
/// );
/// ```
pub fn apply_alignment(html: &str, alignment: Option<&str>) -> String {
    let alignment = Alignment::parse_lenient(alignment);
    format!("<div class=\"{}\">{html}</div>", alignment.class_name())
}
