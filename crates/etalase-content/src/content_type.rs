//! The content directories a site knows about.

use std::fmt;
use std::str::FromStr;

use etalase_core::Error;
use serde::{Deserialize, Serialize};

/// A named category of documents, stored in its own directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Products,
    Portfolio,
    Articles,
    About,
    Contact,
    Settings,
}

impl ContentType {
    /// Every known content type.
    pub const ALL: [ContentType; 6] = [
        Self::Products,
        Self::Portfolio,
        Self::Articles,
        Self::About,
        Self::Contact,
        Self::Settings,
    ];

    /// Directory name under the content root.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Portfolio => "portfolio",
            Self::Articles => "articles",
            Self::About => "about",
            Self::Contact => "contact",
            Self::Settings => "settings",
        }
    }

    /// JSON key used for a single record of this type.
    pub fn singular(self) -> &'static str {
        match self {
            Self::Products => "product",
            Self::Portfolio => "portfolioItem",
            Self::Articles => "article",
            Self::About => "about",
            Self::Contact => "contact",
            Self::Settings => "settings",
        }
    }

    /// Fields authored as currency strings that load as integers.
    pub fn currency_fields(self) -> &'static [&'static str] {
        match self {
            Self::Products => &["price", "originalPrice", "stock"],
            _ => &[],
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ContentType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "products" => Ok(Self::Products),
            "portfolio" => Ok(Self::Portfolio),
            "articles" => Ok(Self::Articles),
            "about" => Ok(Self::About),
            "contact" => Ok(Self::Contact),
            "settings" | "site-config" => Ok(Self::Settings),
            other => Err(Error::invalid_data(format!("unknown content type '{other}'"))),
        }
    }
}
