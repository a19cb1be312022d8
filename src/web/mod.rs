//! Web API module for Fridgify.
//!
//! This module exposes the inventory store over a small REST API so a
//! browser frontend can drive the same operations as the CLI.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/inventory` - Full state (categories and items)
//! - `POST /api/categories` - Add a category
//! - `DELETE /api/categories/{label}` - Remove a category and its items
//! - `POST /api/categories/{label}/items` - Add an item (image looked up afterwards)
//! - `DELETE /api/categories/{label}/items/{id}` - Remove an item
//! - `GET /api/expired` - Expired items across all categories
//! - `GET /api/export` - Download the inventory as `fridge_inventory.json`
//! - `POST /api/import` - Replace the inventory with an uploaded document

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::codec::{self, EXPORT_FILE_NAME};
use crate::enrichment::{ImageSearch, PixabayClient};
use crate::models::{parse_expiration_date, today, Inventory, Item};
use crate::store::{Change, InventoryStore, NewItem};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// The single inventory store; every handler goes through it
    store: Arc<Mutex<InventoryStore>>,
    /// Image search client. Items are added without images when `None`.
    search: Option<PixabayClient>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(store: InventoryStore, search: Option<PixabayClient>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            search,
        }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Request body for adding a category.
#[derive(Debug, Deserialize)]
pub struct AddCategoryRequest {
    /// Category label
    pub label: String,
}

/// Response for a created category.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// Category label
    pub label: String,
}

/// Response for a removed category.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedCategoryResponse {
    /// Category label
    pub label: String,
    /// Number of items deleted with it
    pub items_removed: usize,
}

/// Request body for adding an item, shaped like the "add item" form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    /// Item name
    #[serde(default)]
    pub name: String,
    /// Units on hand
    #[serde(default)]
    pub quantity: u32,
    /// Expiration date (`YYYY-MM-DD`); blank when not entered
    #[serde(default)]
    pub expiration_date: String,
}

/// Expired items response.
#[derive(Debug, Serialize)]
pub struct ExpiredResponse {
    /// Expired items in display order
    pub items: Vec<Item>,
    /// Number of expired items
    pub count: usize,
}

/// Import result.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    /// Number of categories after the import
    pub categories: usize,
    /// Number of items after the import
    pub items: usize,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn storage_error(e: &anyhow::Error) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::with_details(
            "Failed to save inventory",
            format!("{e:#}"),
        )),
    )
}

fn category_not_found(label: &str) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(format!("Category not found: {label}"))),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/inventory - Full state.
async fn get_inventory(State(state): State<AppState>) -> Json<Inventory> {
    let store = state.store.lock().await;
    Json(store.inventory().clone())
}

/// POST /api/categories - Add a category.
async fn add_category(
    State(state): State<AppState>,
    Json(request): Json<AddCategoryRequest>,
) -> ApiResult<(StatusCode, Json<CategoryResponse>)> {
    if request.label.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("Category label is empty")),
        ));
    }

    let mut store = state.store.lock().await;
    match store
        .add_category(&request.label)
        .map_err(|e| storage_error(&e))?
    {
        Some(_) => Ok((
            StatusCode::CREATED,
            Json(CategoryResponse {
                label: request.label,
            }),
        )),
        None => Err((
            StatusCode::CONFLICT,
            Json(ApiError::new(format!(
                "Category already exists: {}",
                request.label
            ))),
        )),
    }
}

/// DELETE /api/categories/{label} - Remove a category and all its items.
async fn remove_category(
    State(state): State<AppState>,
    Path(label): Path<String>,
) -> ApiResult<Json<RemovedCategoryResponse>> {
    let mut store = state.store.lock().await;
    match store.remove_category(&label).map_err(|e| storage_error(&e))? {
        Some(Change::CategoryRemoved {
            label,
            items_removed,
        }) => Ok(Json(RemovedCategoryResponse {
            label,
            items_removed,
        })),
        _ => Err(category_not_found(&label)),
    }
}

/// POST /api/categories/{label}/items - Add an item.
///
/// The item is committed first. The image lookup runs without holding the
/// store lock, and the image is patched in only if the item still exists.
async fn add_item(
    State(state): State<AppState>,
    Path(label): Path<String>,
    Json(request): Json<AddItemRequest>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let expiration_date = if request.expiration_date.trim().is_empty() {
        None
    } else {
        Some(parse_expiration_date(&request.expiration_date).map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiError::with_details("Invalid expiration date", e.to_string())),
            )
        })?)
    };

    let new_item = NewItem {
        category: label.clone(),
        name: request.name.clone(),
        quantity: request.quantity,
        expiration_date,
    };

    let (category, id) = {
        let mut store = state.store.lock().await;
        if !store.inventory().has_category(&label) {
            return Err(category_not_found(&label));
        }

        match store.add_item(new_item).map_err(|e| storage_error(&e))? {
            Some(Change::ItemAdded { category, id }) => (category, id),
            _ => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiError::new(
                        "Item not added: name, a positive quantity and an expiration date are required",
                    )),
                ))
            }
        }
    };

    if let Some(search) = &state.search {
        let image_url = search.find_image(&request.name).await;
        let mut store = state.store.lock().await;
        store
            .set_item_image(&category, &id, image_url)
            .map_err(|e| storage_error(&e))?;
    }

    let store = state.store.lock().await;
    let item = store.find_item(&category, &id).cloned().ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::new(format!("Item was removed: {id}"))),
        )
    })?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /api/categories/{label}/items/{id} - Remove an item.
async fn remove_item(
    State(state): State<AppState>,
    Path((label, id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let mut store = state.store.lock().await;
    match store
        .remove_item(&label, &id)
        .map_err(|e| storage_error(&e))?
    {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError::new(format!("Item not found: {label}/{id}"))),
        )),
    }
}

/// GET /api/expired - Expired items across all categories.
async fn list_expired(State(state): State<AppState>) -> Json<ExpiredResponse> {
    let store = state.store.lock().await;
    let items: Vec<Item> = store
        .expired_items(today())
        .into_iter()
        .cloned()
        .collect();

    Json(ExpiredResponse {
        count: items.len(),
        items,
    })
}

/// GET /api/export - Inventory as a downloadable JSON document.
async fn export_inventory(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let store = state.store.lock().await;
    let body = codec::export_json(store.inventory()).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details("Failed to export inventory", e.to_string())),
        )
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        body,
    ))
}

/// POST /api/import - Replace the inventory with the request body.
///
/// A body that does not parse leaves the current state untouched.
async fn import_inventory(
    State(state): State<AppState>,
    body: String,
) -> ApiResult<Json<ImportResponse>> {
    let inventory = codec::import_json(&body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details(
                "Error importing data. Please check the file format.",
                e.to_string(),
            )),
        )
    })?;

    let mut store = state.store.lock().await;
    store.replace(inventory).map_err(|e| storage_error(&e))?;

    Ok(Json(ImportResponse {
        categories: store.categories().len(),
        items: store.inventory().item_count(),
    }))
}

// ============================================================================
// Router
// ============================================================================

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    // The server is meant to run next to a local frontend, so any origin is allowed.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/inventory", get(get_inventory))
        .route("/api/categories", post(add_category))
        .route("/api/categories/{label}", delete(remove_category))
        .route("/api/categories/{label}/items", post(add_item))
        .route("/api/categories/{label}/items/{id}", delete(remove_item))
        .route("/api/expired", get(list_expired))
        .route("/api/export", get(export_inventory))
        .route("/api/import", post(import_inventory))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the server fails to bind or serve.
pub async fn run_server(
    store: InventoryStore,
    search: Option<PixabayClient>,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let app = create_router(AppState::new(store, search));

    info!("Starting Fridgify web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
