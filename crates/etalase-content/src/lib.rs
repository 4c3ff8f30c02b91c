//! Markdown rendering, frontmatter parsing, and the content repository.
//!
//! This crate is the content layer of an Etalase site: authored documents
//! live as frontmatter files, one directory per content type, and are read
//! into [`ContentDocument`]s, normalized, and projected into typed records.
//!
//! # Modules
//!
//! - [`markdown`]: The markdown-to-HTML converter and its style helpers
//! - [`frontmatter`]: The [`FrontmatterParser`] seam and its YAML implementation
//! - [`document`]: [`ContentDocument`] and lenient field accessors
//! - [`normalize`]: Wrapper-list flattening and currency coercion
//! - [`content_type`]: The known content directories
//! - [`records`]: Typed projections (products, articles, portfolio, ...)
//! - [`repository`]: Directory-backed loading, lookup, and the admin write path
//! - [`cache`]: Optional fingerprint-validated document cache
//!
//! # Example
//!
//! ```rust
//! use etalase_content::markdown::render;
//!
//! let html = render("# Koleksi Baru\n\nKaos **katun** terbaik.");
//! assert_eq!(
//!     html,
//!     "<h1>Koleksi Baru</h1>\n<p>Kaos <strong>katun</strong> terbaik.</p>"
//! );
//! ```

pub mod cache;
pub mod content_type;
pub mod document;
pub mod frontmatter;
pub mod markdown;
pub mod normalize;
pub mod records;
pub mod repository;

// Re-export commonly used types
pub use content_type::ContentType;
pub use document::ContentDocument;
pub use frontmatter::{FrontmatterParser, Metadata, ParsedDocument, YamlFrontmatter};
pub use markdown::{apply_alignment, markdown_styles, render, render_opt, Alignment};
pub use records::{
    AboutPage, Article, ContactInfo, PortfolioItem, Product, Record, SiteSettings, Variant,
};
pub use repository::ContentRepository;
