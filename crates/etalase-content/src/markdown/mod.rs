//! Markdown-to-HTML conversion.
//!
//! - [`render`]: The converter used for every markdown-authored field
//! - [`alignment`]: Text alignment wrappers
//! - [`styles`]: Semantic style names mapped to CSS class strings
//!
//! The converter deliberately supports a small dialect: headings, bold,
//! italic, links, flat lists, paragraphs, and line breaks. Anything else
//! (tables, code fences, blockquotes, nested lists) passes through as text.

pub mod alignment;
pub mod render;
pub mod styles;

pub use alignment::{apply_alignment, Alignment};
pub use render::{render, render_opt};
pub use styles::{markdown_styles, style_class};
