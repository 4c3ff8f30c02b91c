//! Handler functions for the content commands.
//!
//! These implement `render`, `list`, `show`, `related`, `set-variants`, and
//! `health`. Each returns its output as a string; `app` prints it.

use std::path::Path;

use etalase_content::{
    apply_alignment, render, AboutPage, Article, ContactInfo, ContentDocument, ContentRepository,
    ContentType, PortfolioItem, Product, Record, SiteSettings, Variant,
};
use etalase_core::util::files;
use etalase_core::{Error, Result};
use etalase_query::{query, QueryOptions, QueryResult, Queryable};
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt};

// ============================================================================
// Option types
// ============================================================================

/// Options for `list`.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub content_type: String,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: String,
    pub page: usize,
    pub page_size: usize,
    /// Print the page as JSON instead of a summary table.
    pub json: bool,
}

impl ListOptions {
    fn query_options(&self) -> QueryOptions {
        let mut options = QueryOptions::new()
            .with_sort_name(&self.sort)
            .with_page(self.page)
            .with_page_size(self.page_size);
        if let Some(category) = &self.category {
            options = options.with_category(category);
        }
        if let Some(search) = &self.search {
            options = options.with_search(search);
        }
        options
    }
}

/// Options for `related`.
#[derive(Debug, Clone)]
pub struct RelatedOptions {
    pub content_type: String,
    pub slug: String,
    pub field: String,
    pub limit: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// Render a markdown file, or stdin when `file` is `None`.
pub async fn handle_render(file: Option<&str>, align: Option<&str>) -> Result<String> {
    let markdown = match file {
        Some(path) => files::read_file(Path::new(path)).await?,
        None => read_markdown(tokio::io::stdin()).await?,
    };
    Ok(render_markdown(&markdown, align))
}

async fn read_markdown<R: AsyncRead + Unpin>(mut reader: R) -> Result<String> {
    let mut markdown = String::new();
    reader.read_to_string(&mut markdown).await?;
    Ok(markdown)
}

fn render_markdown(markdown: &str, align: Option<&str>) -> String {
    let html = render(markdown);
    match align {
        Some(_) => apply_alignment(&html, align),
        None => html,
    }
}

/// List one page of a content type.
///
/// Products, portfolio, and articles go through the query layer; other
/// directories are listed whole in file-name order.
pub async fn handle_list(repository: &ContentRepository, options: &ListOptions) -> Result<String> {
    let documents = repository.load_all(&options.content_type).await?;
    let query_options = options.query_options();

    match options.content_type.parse::<ContentType>().ok() {
        Some(ContentType::Products) => {
            list_page::<Product>(&documents, &query_options, options.json)
        }
        Some(ContentType::Portfolio) => {
            list_page::<PortfolioItem>(&documents, &query_options, options.json)
        }
        Some(ContentType::Articles) => {
            list_page::<Article>(&documents, &query_options, options.json)
        }
        known => {
            if options.category.is_some() || options.search.is_some() {
                log::warn!(
                    "'{}' cannot be filtered; listing every document",
                    options.content_type
                );
            }
            if options.json {
                return pretty(&project_all(known, &documents)?);
            }
            Ok(documents
                .iter()
                .map(|doc| {
                    let title = doc.first_str(&["name", "title"]).unwrap_or_default();
                    format!("{:<28} {title}", doc.slug)
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

fn list_page<R>(documents: &[ContentDocument], options: &QueryOptions, json: bool) -> Result<String>
where
    R: Record + Queryable + Clone,
{
    if json {
        return pretty(&paged::<R>(documents, options)?);
    }

    let records: Vec<R> = documents.iter().map(R::from_document).collect();
    let result = query(&records, options);

    let mut lines: Vec<String> = result
        .items
        .iter()
        .map(|record| {
            let price = record.price().map(|p| p.to_string()).unwrap_or_default();
            format!(
                "{:<28} {:<32} {:<16} {price:>10}",
                record.slug(),
                record.name(),
                record.category()
            )
        })
        .collect();
    lines.push(format!(
        "\nPage {} of {} ({} matching)",
        result.page, result.total_pages, result.total_count
    ));
    Ok(lines.join("\n"))
}

/// Show a document as its typed record, or its body rendered to HTML.
pub async fn handle_show(
    repository: &ContentRepository,
    content_type: &str,
    slug: &str,
    html: bool,
) -> Result<String> {
    let document = repository.load_by_slug(content_type, slug).await?;
    if html {
        return Ok(render(&document.body));
    }
    pretty(&project(content_type.parse().ok(), &document)?)
}

/// List documents sharing `field` with the given document.
pub async fn handle_related(repository: &ContentRepository, options: &RelatedOptions) -> Result<String> {
    let target = repository
        .load_by_slug(&options.content_type, &options.slug)
        .await?;
    let Some(value) = target.str_field(&options.field) else {
        return Ok(format!(
            "'{}' has no '{}' to match on",
            options.slug, options.field
        ));
    };

    let related = repository
        .load_related(
            &options.content_type,
            &options.slug,
            &options.field,
            &value,
            options.limit,
        )
        .await?;

    if related.is_empty() {
        return Ok(format!("No related {} for {} = {value}", options.content_type, options.field));
    }
    Ok(related
        .iter()
        .map(|doc| {
            let title = doc.first_str(&["name", "title"]).unwrap_or_default();
            format!("{:<28} {title}", doc.slug)
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Replace a product's variants with the JSON array in `file`.
pub async fn handle_set_variants(
    repository: &ContentRepository,
    slug: &str,
    file: &str,
) -> Result<String> {
    let raw = files::read_file(Path::new(file)).await?;
    let variants: Vec<Variant> = serde_json::from_str(&raw)
        .map_err(|e| Error::invalid_data(format!("{file}: expected an array of variants: {e}")))?;

    let product = repository.update_variants(slug, &variants).await?;
    Ok(format!(
        "Updated {} variants of '{}' (variant stock {})",
        product.variants.len(),
        product.slug,
        product.variant_stock()
    ))
}

/// Report the content root and which content directories exist.
pub async fn handle_health(repository: &ContentRepository) -> Result<String> {
    let root = repository.root();
    if !files::exists(root).await {
        return Err(Error::not_found(format!(
            "content root {} does not exist",
            root.display()
        )));
    }

    let types = repository.content_types().await?;
    let listed = if types.is_empty() {
        "(none)".to_string()
    } else {
        types.join(", ")
    };
    Ok(format!(
        "content root: {}\ncontent types: {listed}",
        root.display()
    ))
}

// ============================================================================
// Record projection
// ============================================================================

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::serialization(e.to_string()))
}

fn pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::serialization(e.to_string()))
}

/// Project a document into its typed record, or pass it through raw for
/// directories that are not a known content type.
pub(crate) fn project(content_type: Option<ContentType>, document: &ContentDocument) -> Result<Value> {
    match content_type {
        Some(ContentType::Products) => to_json(&Product::from_document(document)),
        Some(ContentType::Portfolio) => to_json(&PortfolioItem::from_document(document)),
        Some(ContentType::Articles) => to_json(&Article::from_document(document)),
        Some(ContentType::About) => to_json(&AboutPage::from_document(document)),
        Some(ContentType::Contact) => to_json(&ContactInfo::from_document(document)),
        Some(ContentType::Settings) => to_json(&SiteSettings::from_document(document)),
        None => to_json(document),
    }
}

pub(crate) fn project_all(
    content_type: Option<ContentType>,
    documents: &[ContentDocument],
) -> Result<Vec<Value>> {
    documents
        .iter()
        .map(|document| project(content_type, document))
        .collect()
}

/// Query typed records and project the page to JSON.
pub(crate) fn paged<R>(documents: &[ContentDocument], options: &QueryOptions) -> Result<QueryResult<Value>>
where
    R: Record + Queryable + Clone,
{
    let records: Vec<R> = documents.iter().map(R::from_document).collect();
    let result = query(&records, options);
    Ok(QueryResult {
        items: result.items.iter().map(to_json).collect::<Result<_>>()?,
        total_count: result.total_count,
        page: result.page,
        page_size: result.page_size,
        total_pages: result.total_pages,
    })
}

// ============================================================================
// Tests
// ============================================================================
