//! Query inputs and outputs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ordering applied before pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    RatingDesc,
    DateDesc,
    DateAsc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 7] = [
        Self::NameAsc,
        Self::NameDesc,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::RatingDesc,
        Self::DateDesc,
        Self::DateAsc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::RatingDesc => "rating-desc",
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
        }
    }

    /// Parse a sort name, falling back to [`SortOrder::NameAsc`].
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            if !value.is_empty() {
                log::warn!("unknown sort '{value}'; using name-asc");
            }
            Self::default()
        })
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| format!("unknown sort order '{s}'"))
    }
}

impl From<String> for SortOrder {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<SortOrder> for String {
    fn from(value: SortOrder) -> Self {
        value.as_str().to_string()
    }
}

/// Filter, sort, and page selection.
///
/// Deserializes from the camelCase query-string shape used by the HTTP
/// layer (`category`, `search`, `sort`, `page`, `pageSize`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryOptions {
    /// Exact, case-sensitive category; `None` or `"all"` disables the filter.
    pub category: Option<String>,
    /// Case-insensitive substring over name, description, and tags.
    #[serde(alias = "searchTerm")]
    pub search: Option<String>,
    #[serde(alias = "sortBy")]
    pub sort: SortOrder,
    /// 1-based page index.
    pub page: usize,
    pub page_size: usize,
}

/// Default page size of catalog listings.
pub const DEFAULT_PAGE_SIZE: usize = 9;

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            category: None,
            search: None,
            sort: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Set the sort from its name; unknown names use the default.
    pub fn with_sort_name(mut self, sort: &str) -> Self {
        self.sort = SortOrder::parse_lenient(sort);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Category filter in effect, if any.
    pub fn active_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != "all")
    }

    /// Search term in effect, if any.
    pub fn active_search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// One page of a filtered, sorted collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<T> {
    pub items: Vec<T>,
    /// Records matching the filters, across all pages.
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// A category and the number of records in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}
