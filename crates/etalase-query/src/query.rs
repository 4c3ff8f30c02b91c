//! The filter → sort → paginate pipeline.

use std::cmp::Ordering;

use crate::queryable::Queryable;
use crate::types::{CategoryCount, QueryOptions, QueryResult, SortOrder};

/// Filter, sort, and paginate `records`.
///
/// Never fails: an out-of-range page yields an empty `items` with correct
/// counts, and a zero page or page size is treated as `1`.
///
/// # Example
///
/// ```
/// use etalase_content::Product;
/// use etalase_query::{query, QueryOptions};
///
/// let products: Vec<Product> = ["Topi", "Kaos", "Jaket"]
///     .iter()
///     .map(|name| Product { name: name.to_string(), ..Default::default() })
///     .collect();
///
/// let result = query(&products, &QueryOptions::new().with_page_size(2));
/// assert_eq!(result.total_pages, 2);
/// assert_eq!(result.items[0].name, "Jaket");
/// assert_eq!(result.items[1].name, "Kaos");
/// ```
pub fn query<T: Queryable + Clone>(records: &[T], options: &QueryOptions) -> QueryResult<T> {
    let category = options.active_category();
    let needle = options.active_search().map(str::to_lowercase);

    let mut matched: Vec<&T> = records
        .iter()
        .filter(|r| category.is_none_or(|c| r.category() == c))
        .filter(|r| needle.as_deref().is_none_or(|n| matches_search(*r, n)))
        .collect();

    // `sort_by` is stable, so equal keys keep their input order.
    matched.sort_by(|a, b| compare(*a, *b, options.sort));

    let page_size = options.page_size.max(1);
    let page = options.page.max(1);
    let total_count = matched.len();
    let total_pages = total_count.div_ceil(page_size);

    let items: Vec<T> = matched
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect();

    log::debug!(
        "query matched {total_count} of {} records; page {page}/{total_pages}",
        records.len()
    );

    QueryResult {
        items,
        total_count,
        page,
        page_size,
        total_pages,
    }
}

/// Distinct non-empty categories with their record counts, in first-seen order.
pub fn categories<T: Queryable>(records: &[T]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for record in records {
        let name = record.category();
        if name.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|c| c.name == name) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                name: name.to_string(),
                count: 1,
            }),
        }
    }
    counts
}

fn matches_search<T: Queryable>(record: &T, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);
    contains(record.name())
        || contains(record.description())
        || record.tags().iter().any(|tag| contains(tag.as_str()))
}

/// Records that both lack the sort key fall back to name ascending.
fn compare<T: Queryable>(a: &T, b: &T, sort: SortOrder) -> Ordering {
    let by_key = match sort {
        SortOrder::NameAsc => return compare_text(a.name(), b.name()),
        SortOrder::NameDesc => return compare_text(b.name(), a.name()),
        SortOrder::PriceAsc => missing_last(a.price(), b.price(), |x, y| x.cmp(&y)),
        SortOrder::PriceDesc => missing_last(a.price(), b.price(), |x, y| y.cmp(&x)),
        SortOrder::RatingDesc => missing_last(a.rating(), b.rating(), |x, y| y.total_cmp(&x)),
        SortOrder::DateDesc => missing_last(a.date(), b.date(), |x, y| y.cmp(x)),
        SortOrder::DateAsc => missing_last(a.date(), b.date(), |x, y| x.cmp(y)),
    };
    by_key.unwrap_or_else(|| compare_text(a.name(), b.name()))
}

/// Case-insensitive ordering, with byte order breaking ties.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// `None` when neither side has the key.
fn missing_last<V>(
    a: Option<V>,
    b: Option<V>,
    cmp: impl Fn(V, V) -> Ordering,
) -> Option<Ordering> {
    match (a, b) {
        (Some(x), Some(y)) => Some(cmp(x, y)),
        (Some(_), None) => Some(Ordering::Less),
        (None, Some(_)) => Some(Ordering::Greater),
        (None, None) => None,
    }
}
