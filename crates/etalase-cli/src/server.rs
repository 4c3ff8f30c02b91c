//! HTTP content endpoints.
//!
//! Thin JSON wrappers around the repository and query layer:
//!
//! | Route                                   | Response                                     |
//! |-----------------------------------------|----------------------------------------------|
//! | `GET /api/health`                       | `{success, status, version}`                 |
//! | `GET /api/settings`                     | `{success, settings}`                        |
//! | `GET /api/{type}`                       | `{success, <type>: [...], count}`            |
//! | `GET /api/{type}?category=&sort=&page=` | adds `page`, `pageSize`, `totalPages`        |
//! | `GET /api/{type}/{slug}`                | `{success, <singular>}`; `?html=true` adds `html` |
//! | `GET /api/{type}/{slug}/related`        | `{success, <type>: [...], count}`            |
//! | `POST /api/admin/variants`              | `{success, product}`                         |
//!
//! Failures are `{error, message}` with 400, 404, or 500. A content type
//! with no directory is an empty listing, never an error.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use etalase_content::{render, Article, ContentRepository, ContentType, PortfolioItem, Product, Variant};
use etalase_core::{Error, Result};
use etalase_query::QueryOptions;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

use crate::content_handlers::{paged, project, project_all};

/// Related items returned when `limit` is not given.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

#[derive(Clone)]
struct AppState {
    repository: Arc<ContentRepository>,
}

/// Build the API router over `repository`.
pub fn router(repository: Arc<ContentRepository>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/settings", get(settings))
        .route("/api/admin/variants", post(update_variants))
        .route("/api/{content_type}", get(list_content))
        .route("/api/{content_type}/{slug}", get(show_content))
        .route("/api/{content_type}/{slug}/related", get(related_content))
        .with_state(AppState { repository })
}

/// Bind `addr` and serve until the process exits.
pub async fn serve(repository: Arc<ContentRepository>, addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        "serving {} on http://{}",
        repository.root().display(),
        listener.local_addr()?
    );
    axum::serve(listener, router(repository)).await?;
    Ok(())
}

// ============================================================================
// Errors
// ============================================================================

/// An error rendered as `{error, message}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl ToString) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "bad_request",
            message: message.to_string(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, kind) = if err.is_not_found() {
            (StatusCode::NOT_FOUND, "not_found")
        } else if err.is_client_error() {
            (StatusCode::BAD_REQUEST, "bad_request")
        } else if err.is_parse() {
            (StatusCode::INTERNAL_SERVER_ERROR, "parse_error")
        } else if matches!(err, Error::Write { .. }) {
            (StatusCode::INTERNAL_SERVER_ERROR, "write_failed")
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        };
        Self {
            status,
            kind,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(kind = self.kind, "{}", self.message);
        } else {
            tracing::info!(kind = self.kind, "{}", self.message);
        }
        let body = json!({ "error": self.kind, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

type ApiResult = std::result::Result<Json<Value>, ApiError>;

// ============================================================================
// Request parameters
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListParams {
    category: Option<String>,
    search: Option<String>,
    sort: Option<String>,
    page: Option<usize>,
    page_size: Option<usize>,
}

impl ListParams {
    fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.search.is_none()
            && self.sort.is_none()
            && self.page.is_none()
            && self.page_size.is_none()
    }

    fn to_options(&self) -> QueryOptions {
        let mut options = QueryOptions::new();
        if let Some(category) = &self.category {
            options = options.with_category(category);
        }
        if let Some(search) = &self.search {
            options = options.with_search(search);
        }
        if let Some(sort) = &self.sort {
            options = options.with_sort_name(sort);
        }
        if let Some(page) = self.page {
            options = options.with_page(page);
        }
        if let Some(page_size) = self.page_size {
            options = options.with_page_size(page_size);
        }
        options
    }
}

#[derive(Debug, Default, Deserialize)]
struct ShowParams {
    html: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct RelatedParams {
    field: Option<String>,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct VariantsUpdate {
    slug: String,
    variants: Vec<Variant>,
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn settings(State(state): State<AppState>) -> ApiResult {
    let settings = state.repository.load_settings().await?;
    Ok(Json(json!({ "success": true, "settings": settings })))
}

async fn list_content(
    State(state): State<AppState>,
    Path(content_type): Path<String>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> ApiResult {
    let Query(params) = params.map_err(ApiError::bad_request)?;
    let documents = state.repository.load_all(&content_type).await?;
    let known = content_type.parse::<ContentType>().ok();

    let mut body = Map::new();
    body.insert("success".into(), Value::Bool(true));

    if params.is_empty() {
        let items = project_all(known, &documents)?;
        body.insert("count".into(), json!(items.len()));
        body.insert(content_type.clone(), Value::Array(items));
    } else {
        let options = params.to_options();
        let page = match known {
            Some(ContentType::Products) => paged::<Product>(&documents, &options)?,
            Some(ContentType::Portfolio) => paged::<PortfolioItem>(&documents, &options)?,
            Some(ContentType::Articles) => paged::<Article>(&documents, &options)?,
            _ => {
                return Err(ApiError::bad_request(format!(
                    "'{content_type}' does not support filtering or paging"
                )));
            }
        };
        body.insert("count".into(), json!(page.total_count));
        body.insert("page".into(), json!(page.page));
        body.insert("pageSize".into(), json!(page.page_size));
        body.insert("totalPages".into(), json!(page.total_pages));
        body.insert(content_type.clone(), Value::Array(page.items));
    }

    tracing::info!("GET /api/{content_type}: {} documents", documents.len());
    Ok(Json(Value::Object(body)))
}

async fn show_content(
    State(state): State<AppState>,
    Path((content_type, slug)): Path<(String, String)>,
    params: std::result::Result<Query<ShowParams>, QueryRejection>,
) -> ApiResult {
    let Query(params) = params.map_err(ApiError::bad_request)?;
    let document = state.repository.load_by_slug(&content_type, &slug).await?;
    let known = content_type.parse::<ContentType>().ok();
    let key = known.map_or("document", ContentType::singular);

    let mut body = Map::new();
    body.insert("success".into(), Value::Bool(true));
    body.insert(key.into(), project(known, &document)?);
    if params.html.unwrap_or(false) {
        body.insert("html".into(), Value::String(render(&document.body)));
    }

    tracing::info!("GET /api/{content_type}/{slug}");
    Ok(Json(Value::Object(body)))
}

async fn related_content(
    State(state): State<AppState>,
    Path((content_type, slug)): Path<(String, String)>,
    params: std::result::Result<Query<RelatedParams>, QueryRejection>,
) -> ApiResult {
    let Query(params) = params.map_err(ApiError::bad_request)?;
    let field = params.field.as_deref().unwrap_or("category");
    let limit = params.limit.unwrap_or(DEFAULT_RELATED_LIMIT);

    let target = state.repository.load_by_slug(&content_type, &slug).await?;
    let related = match target.str_field(field) {
        Some(value) => {
            state
                .repository
                .load_related(&content_type, &slug, field, &value, limit)
                .await?
        }
        None => Vec::new(),
    };

    let items = project_all(content_type.parse().ok(), &related)?;
    let mut body = Map::new();
    body.insert("success".into(), Value::Bool(true));
    body.insert("count".into(), json!(items.len()));
    body.insert(content_type, Value::Array(items));
    Ok(Json(Value::Object(body)))
}

async fn update_variants(
    State(state): State<AppState>,
    payload: std::result::Result<Json<VariantsUpdate>, JsonRejection>,
) -> ApiResult {
    let Json(update) = payload.map_err(ApiError::bad_request)?;
    let product = state
        .repository
        .update_variants(&update.slug, &update.variants)
        .await?;

    tracing::info!(
        "updated variants of '{}' ({} variants, stock {})",
        update.slug,
        product.variants.len(),
        product.variant_stock()
    );
    Ok(Json(json!({ "success": true, "product": product })))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn write(root: &std::path::Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    fn fixture() -> (TempDir, Router) {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(
            root,
            "products/kaos-polos.md",
            "---\nname: Kaos Polos\ncategory: kaos\nprice: \"Rp 85.000\"\ntags:\n  - item: katun\nvariants:\n  - color: Hitam\n    stock: 3\n---\nKaos **katun**.\n",
        );
        write(
            root,
            "products/kaos-sablon.md",
            "---\nname: Kaos Sablon\ncategory: kaos\nprice: 95000\n---\n",
        );
        write(
            root,
            "products/topi-rimba.md",
            "---\nname: Topi Rimba\ncategory: topi\nprice: 60000\n---\n",
        );
        write(
            root,
            "settings/site.md",
            "---\nsiteName: Toko Kaos\nsocial:\n  instagram: https://instagram.com/tokokaos\n---\n",
        );
        write(root, "about/tentang.md", "---\ntitle: Tentang Kami\n---\nSejak 1998.\n");

        let repository = Arc::new(ContentRepository::new(root));
        (temp, router(repository))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(app, request).await
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    // ------------------------------------------------------------------------
    // Read endpoints
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_health() {
        let (_temp, app) = fixture();
        let (status, body) = get_json(&app, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_products() {
        let (_temp, app) = fixture();
        let (status, body) = get_json(&app, "/api/products").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 3);
        assert_eq!(body["products"][0]["slug"], "kaos-polos");
        assert_eq!(body["products"][0]["price"], 85000);
        assert_eq!(body["products"][0]["tags"], json!(["katun"]));
        assert!(body.get("totalPages").is_none());
    }

    #[tokio::test]
    async fn test_list_missing_type_is_empty() {
        let (_temp, app) = fixture();
        let (status, body) = get_json(&app, "/api/nonexistent-type").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);
        assert_eq!(body["nonexistent-type"], json!([]));
    }

    #[tokio::test]
    async fn test_list_with_query() {
        let (_temp, app) = fixture();
        let (status, body) =
            get_json(&app, "/api/products?category=kaos&sort=price-desc&pageSize=1&page=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["page"], 2);
        assert_eq!(body["pageSize"], 1);
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["products"].as_array().unwrap().len(), 1);
        assert_eq!(body["products"][0]["slug"], "kaos-polos");
    }

    #[tokio::test]
    async fn test_list_unknown_sort_falls_back() {
        let (_temp, app) = fixture();
        let (status, body) = get_json(&app, "/api/products?sort=terlaris").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["products"][0]["name"], "Kaos Polos");
        assert_eq!(body["products"][2]["name"], "Topi Rimba");
    }

    #[tokio::test]
    async fn test_list_bad_page_is_bad_request() {
        let (_temp, app) = fixture();
        let (status, body) = get_json(&app, "/api/products?page=dua").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_list_hidden_type_is_bad_request() {
        let (_temp, app) = fixture();
        let (status, body) = get_json(&app, "/api/.git").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains(".git"));
    }

    #[tokio::test]
    async fn test_show_with_html() {
        let (_temp, app) = fixture();
        let (status, body) = get_json(&app, "/api/products/kaos-polos?html=true").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["product"]["name"], "Kaos Polos");
        assert_eq!(body["html"], "<p>Kaos <strong>katun</strong>.</p>");

        let (_, plain) = get_json(&app, "/api/about/tentang").await;
        assert_eq!(plain["about"]["title"], "Tentang Kami");
        assert!(plain.get("html").is_none());
    }

    #[tokio::test]
    async fn test_show_missing_is_not_found() {
        let (_temp, app) = fixture();
        let (status, body) = get_json(&app, "/api/products/tidak-ada").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_related() {
        let (_temp, app) = fixture();
        let (status, body) = get_json(&app, "/api/products/kaos-polos/related").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["products"][0]["slug"], "kaos-sablon");

        let (_, none) = get_json(&app, "/api/products/kaos-polos/related?field=brand").await;
        assert_eq!(none["count"], 0);
    }

    #[tokio::test]
    async fn test_settings() {
        let (_temp, app) = fixture();
        let (status, body) = get_json(&app, "/api/settings").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["settings"]["siteName"], "Toko Kaos");
        assert_eq!(
            body["settings"]["social"]["instagram"],
            "https://instagram.com/tokokaos"
        );
    }

    #[tokio::test]
    async fn test_parse_error_is_server_error() {
        let (temp, app) = fixture();
        write(temp.path(), "articles/rusak.md", "---\ntitle: rusak\n");
        let (status, body) = get_json(&app, "/api/articles").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "parse_error");
        assert!(body["message"].as_str().unwrap().contains("rusak.md"));
    }

    // ------------------------------------------------------------------------
    // Admin endpoint
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_update_variants() {
        let (_temp, app) = fixture();
        let payload = json!({
            "slug": "kaos-polos",
            "variants": [
                {"color": "Hitam", "size": "M", "stock": 1},
                {"color": "Putih", "size": "L", "stock": 6, "price": 90000}
            ]
        });
        let (status, body) = post_json(&app, "/api/admin/variants", payload).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["product"]["variants"].as_array().unwrap().len(), 2);

        let (_, shown) = get_json(&app, "/api/products/kaos-polos").await;
        assert_eq!(shown["product"]["variants"][1]["price"], 90000);
        assert_eq!(shown["product"]["price"], 85000);
    }

    #[tokio::test]
    async fn test_update_variants_keeps_extra_keys_and_authored_fields() {
        let (temp, app) = fixture();
        let payload = json!({
            "slug": "kaos-polos",
            "variants": [{"color": "Hitam", "stock": 1, "image": "/h.jpg"}]
        });
        let (status, body) = post_json(&app, "/api/admin/variants", payload).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["product"]["variants"][0]["image"], "/h.jpg");

        let (_, shown) = get_json(&app, "/api/products/kaos-polos").await;
        assert_eq!(shown["product"]["variants"][0]["image"], "/h.jpg");

        let raw = std::fs::read_to_string(temp.path().join("products/kaos-polos.md")).unwrap();
        assert!(raw.contains("image: /h.jpg"));
        assert!(raw.contains("Rp 85.000"));
        assert!(raw.contains("item: katun"));
    }

    #[tokio::test]
    async fn test_update_variants_unknown_product() {
        let (_temp, app) = fixture();
        let payload = json!({"slug": "tidak-ada", "variants": []});
        let (status, _) = post_json(&app, "/api/admin/variants", payload).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_variants_bad_body() {
        let (_temp, app) = fixture();
        let (status, body) = post_json(&app, "/api/admin/variants", json!({"variants": []})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (Error::not_found("x"), StatusCode::NOT_FOUND),
            (Error::invalid_data("x"), StatusCode::BAD_REQUEST),
            (Error::parse("a.md", "x"), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::write("/a.md", "x"), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::config("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }
}
