//! Typed projections of content documents.
//!
//! Each record type reads a [`ContentDocument`] through the lenient
//! accessors on the document, so a record can always be built: fields in an
//! unexpected shape fall back to empty values with a logged warning.
//! Records serialize with camelCase keys, matching the authored frontmatter
//! and the HTTP payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content_type::ContentType;
use crate::document::ContentDocument;
use crate::frontmatter::Metadata;

/// A typed view over one content type's documents.
pub trait Record: Sized + Serialize + Send + Sync {
    /// Directory the record type is loaded from.
    const CONTENT_TYPE: ContentType;

    /// Project a document into this record type.
    fn from_document(document: &ContentDocument) -> Self;

    /// Identity of the record.
    fn slug(&self) -> &str;

    /// Directory the record type is loaded from.
    fn content_type(&self) -> ContentType {
        Self::CONTENT_TYPE
    }
}

/// Fallback display name: the slug with dashes turned into spaces.
fn title_from_slug(slug: &str) -> String {
    slug.replace(['-', '_'], " ")
}

// ============================================================================
// Products
// ============================================================================

/// One purchasable variation of a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Variant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub stock: i64,
    /// Overrides the product price when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    /// Any other authored keys, kept as-is.
    #[serde(flatten)]
    pub extra: Metadata,
}

impl Variant {
    fn from_value(slug: &str, value: &Value) -> Option<Self> {
        match serde_json::from_value(value.clone()) {
            Ok(variant) => Some(variant),
            Err(e) => {
                log::warn!("{slug}: skipping malformed variant {value}: {e}");
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub slug: String,
    pub name: String,
    pub category: String,
    pub price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<i64>,
    /// Markdown.
    pub description: String,
    /// Markdown.
    pub details: String,
    pub body: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub variants: Vec<Variant>,
    pub rating: f64,
    pub featured: bool,
    /// Explicit stock, or the sum of the variants' stock when absent.
    pub stock: i64,
}

impl Product {
    /// Total stock across all variants.
    pub fn variant_stock(&self) -> i64 {
        self.variants.iter().map(|v| v.stock).sum()
    }

    /// True when the product is marked down.
    pub fn on_sale(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }
}

impl Record for Product {
    const CONTENT_TYPE: ContentType = ContentType::Products;

    fn from_document(doc: &ContentDocument) -> Self {
        let variants: Vec<Variant> = match doc.get("variants") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| Variant::from_value(&doc.slug, item))
                .collect(),
            None | Some(Value::Null) => Vec::new(),
            Some(other) => {
                log::warn!("{}: variants should be a list, found {other}", doc.slug);
                Vec::new()
            }
        };

        let mut images = doc.list_field("images");
        if images.is_empty() {
            images.extend(doc.str_field("image"));
        }

        let stock = doc
            .opt_int_field("stock")
            .unwrap_or_else(|| variants.iter().map(|v| v.stock).sum());

        Self {
            slug: doc.slug.clone(),
            name: doc
                .first_str(&["name", "title"])
                .unwrap_or_else(|| title_from_slug(&doc.slug)),
            category: doc.str_field("category").unwrap_or_default(),
            price: doc.int_field("price"),
            original_price: doc.opt_int_field("originalPrice").filter(|p| *p > 0),
            description: doc.str_field("description").unwrap_or_default(),
            details: doc.str_field("details").unwrap_or_default(),
            body: doc.body.clone(),
            images,
            tags: doc.list_field("tags"),
            variants,
            rating: doc.float_field("rating"),
            featured: doc.bool_field("featured"),
            stock,
        }
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

// ============================================================================
// Portfolio
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub slug: String,
    pub title: String,
    pub client: String,
    pub category: String,
    pub date: String,
    /// Markdown.
    pub description: String,
    pub body: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub featured: bool,
}

impl Record for PortfolioItem {
    const CONTENT_TYPE: ContentType = ContentType::Portfolio;

    fn from_document(doc: &ContentDocument) -> Self {
        let mut images = doc.list_field("images");
        if images.is_empty() {
            images.extend(doc.first_str(&["image", "thumbnail"]));
        }

        Self {
            slug: doc.slug.clone(),
            title: doc
                .first_str(&["title", "name"])
                .unwrap_or_else(|| title_from_slug(&doc.slug)),
            client: doc.str_field("client").unwrap_or_default(),
            category: doc.str_field("category").unwrap_or_default(),
            date: doc.first_str(&["date", "year"]).unwrap_or_default(),
            description: doc.str_field("description").unwrap_or_default(),
            body: doc.body.clone(),
            images,
            tags: doc.list_field("tags"),
            featured: doc.bool_field("featured"),
        }
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

// ============================================================================
// Articles
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub category: String,
    /// Publication date as authored (ISO dates sort correctly as text).
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub body: String,
}

impl Record for Article {
    const CONTENT_TYPE: ContentType = ContentType::Articles;

    fn from_document(doc: &ContentDocument) -> Self {
        Self {
            slug: doc.slug.clone(),
            title: doc
                .first_str(&["title", "name"])
                .unwrap_or_else(|| title_from_slug(&doc.slug)),
            excerpt: doc
                .first_str(&["excerpt", "description"])
                .unwrap_or_default(),
            author: doc.str_field("author").unwrap_or_default(),
            category: doc.str_field("category").unwrap_or_default(),
            date: doc.str_field("date").unwrap_or_default(),
            image: doc.first_str(&["image", "coverImage"]),
            tags: doc.list_field("tags"),
            featured: doc.bool_field("featured"),
            body: doc.body.clone(),
        }
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

// ============================================================================
// Single-page content
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutPage {
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub values: Vec<String>,
    pub alignment: String,
    pub body: String,
}

impl Record for AboutPage {
    const CONTENT_TYPE: ContentType = ContentType::About;

    fn from_document(doc: &ContentDocument) -> Self {
        Self {
            slug: doc.slug.clone(),
            title: doc
                .str_field("title")
                .unwrap_or_else(|| title_from_slug(&doc.slug)),
            subtitle: doc.str_field("subtitle").unwrap_or_default(),
            image: doc.str_field("image"),
            values: doc.list_field("values"),
            alignment: doc.str_field("alignment").unwrap_or_default(),
            body: doc.body.clone(),
        }
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub slug: String,
    pub title: String,
    pub address: String,
    pub phone: String,
    pub whatsapp: String,
    pub email: String,
    pub hours: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    pub body: String,
}

impl Record for ContactInfo {
    const CONTENT_TYPE: ContentType = ContentType::Contact;

    fn from_document(doc: &ContentDocument) -> Self {
        let hours = match doc.get("hours") {
            Some(Value::String(s)) => vec![s.clone()],
            _ => doc.list_field("hours"),
        };

        Self {
            slug: doc.slug.clone(),
            title: doc
                .str_field("title")
                .unwrap_or_else(|| title_from_slug(&doc.slug)),
            address: doc.str_field("address").unwrap_or_default(),
            phone: doc.str_field("phone").unwrap_or_default(),
            whatsapp: doc.str_field("whatsapp").unwrap_or_default(),
            email: doc.str_field("email").unwrap_or_default(),
            hours,
            map_url: doc.first_str(&["mapUrl", "map"]),
            body: doc.body.clone(),
        }
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

// ============================================================================
// Site settings
// ============================================================================

/// Site-wide configuration authored as content (logo, title, contact links).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub slug: String,
    pub site_name: String,
    pub tagline: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub email: String,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    /// Network name to profile URL.
    pub social: BTreeMap<String, String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            slug: "settings".to_string(),
            site_name: "Etalase".to_string(),
            tagline: String::new(),
            description: String::new(),
            logo: None,
            email: String::new(),
            phone: String::new(),
            whatsapp: String::new(),
            address: String::new(),
            social: BTreeMap::new(),
        }
    }
}

impl Record for SiteSettings {
    const CONTENT_TYPE: ContentType = ContentType::Settings;

    fn from_document(doc: &ContentDocument) -> Self {
        let defaults = Self::default();

        let social = match doc.get("social") {
            Some(Value::Object(map)) => map
                .iter()
                .filter_map(|(network, url)| {
                    url.as_str()
                        .filter(|u| !u.is_empty())
                        .map(|u| (network.clone(), u.to_string()))
                })
                .collect(),
            None | Some(Value::Null) => BTreeMap::new(),
            Some(other) => {
                log::warn!("{}: social should be a mapping, found {other}", doc.slug);
                BTreeMap::new()
            }
        };

        Self {
            slug: doc.slug.clone(),
            site_name: doc
                .first_str(&["siteName", "title", "name"])
                .unwrap_or(defaults.site_name),
            tagline: doc.str_field("tagline").unwrap_or_default(),
            description: doc.str_field("description").unwrap_or_default(),
            logo: doc.str_field("logo"),
            email: doc.str_field("email").unwrap_or_default(),
            phone: doc.str_field("phone").unwrap_or_default(),
            whatsapp: doc.str_field("whatsapp").unwrap_or_default(),
            address: doc.str_field("address").unwrap_or_default(),
            social,
        }
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}
