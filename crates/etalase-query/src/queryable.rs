//! Field access used by filtering and sorting.

use etalase_content::{Article, PortfolioItem, Product};

/// A record that can be filtered, searched, and sorted.
///
/// Only `name` and `category` are required; record types without prices,
/// ratings, or dates keep the defaults and sort after those that have them.
pub trait Queryable {
    /// Display name or title.
    fn name(&self) -> &str;

    /// Short description or excerpt, searched alongside the name.
    fn description(&self) -> &str {
        ""
    }

    fn category(&self) -> &str;

    fn tags(&self) -> &[String] {
        &[]
    }

    fn price(&self) -> Option<i64> {
        None
    }

    fn rating(&self) -> Option<f64> {
        None
    }

    /// Authored date; ISO-8601 strings order chronologically.
    fn date(&self) -> Option<&str> {
        None
    }
}

impl Queryable for Product {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn price(&self) -> Option<i64> {
        Some(self.price)
    }

    fn rating(&self) -> Option<f64> {
        Some(self.rating)
    }
}

impl Queryable for PortfolioItem {
    fn name(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn date(&self) -> Option<&str> {
        Some(self.date.as_str()).filter(|d| !d.is_empty())
    }
}

impl Queryable for Article {
    fn name(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.excerpt
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn date(&self) -> Option<&str> {
        Some(self.date.as_str()).filter(|d| !d.is_empty())
    }
}
