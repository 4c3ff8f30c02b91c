//! Filtering, sorting, and pagination over content records.
//!
//! [`query`] runs a record collection through a fixed pipeline:
//!
//! 1. keep records in the requested category (exact match; `"all"` keeps all)
//! 2. keep records whose name, description, or tags contain the search term
//! 3. sort stably by the requested [`SortOrder`]
//! 4. slice out the requested 1-based page
//!
//! Bad input never fails a query: unknown sort names fall back to
//! [`SortOrder::NameAsc`] and out-of-range pages are simply empty.

pub mod query;
pub mod queryable;
pub mod types;

pub use query::{categories, compare_text, query};
pub use queryable::Queryable;
pub use types::{CategoryCount, QueryOptions, QueryResult, SortOrder, DEFAULT_PAGE_SIZE};
