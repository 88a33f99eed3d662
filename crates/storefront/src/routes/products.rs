//! Catalog JSON endpoints.
//!
//! The listing is cached per (filter, page) with a short TTL; the
//! per-response consciousness jitter is applied after the cache read so
//! cached pages still shimmer.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use dem_claire_core::{
    Category, CategoryFilter, ConsciousnessLevel, NeuralTag, Product, ProductId, ProductStatus,
};

use crate::db::products::{NewProduct, ProductRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Default listing page size.
const DEFAULT_LIMIT: i64 = 50;
/// Largest page a client may request.
const MAX_LIMIT: i64 = 200;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Category filter; absent or `ALL` means everything.
    #[serde(default)]
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Listing response body.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub products: Vec<Product>,
    pub total: usize,
    pub neural_status: &'static str,
}

/// List products.
///
/// GET /products
///
/// Products come back ordered by consciousness level descending, each
/// level nudged by a fresh `-2..=3` jitter.
///
/// # Errors
///
/// Returns `AppError::BadRequest` on an unknown category.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>> {
    let raw_filter = params.category.unwrap_or_default();
    let filter: CategoryFilter = raw_filter
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Unknown category: {raw_filter}")))?;

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let key = (raw_filter, limit, offset);
    let page = match state.catalog_cache().get(&key).await {
        Some(page) => page,
        None => {
            let products = ProductRepository::new(state.pool())
                .list(filter, limit, offset)
                .await?;
            let page = Arc::new(products);
            state.catalog_cache().insert(key, Arc::clone(&page)).await;
            page
        }
    };

    let mut rng = rand::rng();
    let products: Vec<Product> = page
        .iter()
        .cloned()
        .map(|mut product| {
            product.consciousness_level =
                product.consciousness_level.jittered(rng.random_range(-2..=3));
            product
        })
        .collect();

    let total = products.len();
    Ok(Json(ListResponse {
        products,
        total,
        neural_status: "ACTIVE",
    }))
}

/// Request body for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub price: rust_decimal::Decimal,
    pub status: Option<ProductStatus>,
    pub category: Option<Category>,
    pub consciousness_level: Option<u8>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sizes: Vec<String>,
}

/// Create a product.
///
/// POST /products
///
/// Omitted fields take the catalog defaults: status ACTIVE, category
/// NEURAL, consciousness level 85, and a freshly rolled `NP###` tag.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the name is empty.
#[instrument(skip(state, body), fields(name = %body.name))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateProduct>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("Product name required".to_string()));
    }

    let product = NewProduct {
        neural_tag: NeuralTag::from_number(rand::rng().random_range(1..=999)),
        name: body.name,
        price: body.price,
        status: body.status.unwrap_or(ProductStatus::Active),
        category: body.category.unwrap_or(Category::Neural),
        consciousness_level: body
            .consciousness_level
            .map_or_else(ConsciousnessLevel::default, ConsciousnessLevel::new),
        description: body.description,
        sizes: body.sizes,
    };

    let id = ProductRepository::new(state.pool()).create(&product).await?;
    state.invalidate_catalog();

    Ok((StatusCode::CREATED, Json(json!({ "success": true, "id": id }))))
}

/// Query parameters naming the product to update or delete.
#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: Option<i64>,
}

/// Partial update body; absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<rust_decimal::Decimal>,
    pub status: Option<ProductStatus>,
    pub category: Option<Category>,
    pub consciousness_level: Option<u8>,
    pub description: Option<String>,
    pub sizes: Option<Vec<String>>,
}

/// Update a product.
///
/// PUT /products?id=N
///
/// # Errors
///
/// Returns `AppError::BadRequest` without an id, `AppError::NotFound`
/// for an unknown one.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
    Json(body): Json<UpdateProduct>,
) -> Result<Json<serde_json::Value>> {
    let id = require_id(params)?;

    let repo = ProductRepository::new(state.pool());
    let current = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let patched = NewProduct {
        neural_tag: current.neural_tag,
        name: body.name.unwrap_or(current.name),
        price: body.price.unwrap_or(current.price.amount),
        status: body.status.unwrap_or(current.status),
        category: body.category.unwrap_or(current.category),
        consciousness_level: body
            .consciousness_level
            .map_or(current.consciousness_level, ConsciousnessLevel::new),
        description: body.description.unwrap_or(current.description),
        sizes: body.sizes.unwrap_or(current.sizes),
    };

    repo.update(id, &patched).await?;
    state.invalidate_catalog();

    Ok(Json(json!({ "success": true })))
}

/// Delete a product.
///
/// DELETE /products?id=N
///
/// # Errors
///
/// Returns `AppError::BadRequest` without an id, `AppError::NotFound`
/// for an unknown one.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> Result<Json<serde_json::Value>> {
    let id = require_id(params)?;

    ProductRepository::new(state.pool()).delete(id).await?;
    state.invalidate_catalog();

    Ok(Json(json!({ "success": true })))
}

fn require_id(params: IdParams) -> Result<ProductId> {
    params
        .id
        .map(ProductId::new)
        .ok_or_else(|| AppError::BadRequest("Product ID required".to_string()))
}
