//! Style lookup for rendered markdown.
//!
//! Maps semantic element names to the utility class strings the site's
//! templates attach to them. The converter itself only uses `link`.

use std::collections::BTreeMap;

/// Semantic style name → class string.
pub const MARKDOWN_STYLES: &[(&str, &str)] = &[
    ("h1", "text-3xl font-bold mb-4"),
    ("h2", "text-2xl font-bold mb-3"),
    ("h3", "text-xl font-semibold mb-2"),
    ("h4", "text-lg font-semibold mb-2"),
    ("h5", "text-base font-semibold mb-1"),
    ("h6", "text-sm font-semibold mb-1"),
    ("p", "mb-4 leading-relaxed"),
    ("ul", "list-disc pl-6 mb-4"),
    ("ol", "list-decimal pl-6 mb-4"),
    ("li", "mb-1"),
    ("link", "text-primary-600 hover:underline"),
    ("strong", "font-semibold"),
    ("em", "italic"),
];

/// Class string for a semantic style name.
pub fn style_class(name: &str) -> Option<&'static str> {
    MARKDOWN_STYLES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, class)| *class)
}

/// The full style map.
pub fn markdown_styles() -> BTreeMap<&'static str, &'static str> {
    MARKDOWN_STYLES.iter().copied().collect()
}
