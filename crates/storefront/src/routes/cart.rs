//! Persisted cart JSON endpoints.
//!
//! Lines are keyed by (user, product); adding a product a user already
//! has merges into the existing line inside the repository upsert.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use dem_claire_core::{CartItemId, ProductId, UserId};

use crate::db::cart::{CartLine, CartRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// One cart line as the frontend renders it.
#[derive(Debug, Serialize)]
pub struct CartItemView {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub name: String,
    pub neural_tag: String,
    pub price: Decimal,
    pub quantity: i32,
    pub line_price: Decimal,
    pub consciousness_level: i16,
}

impl From<CartLine> for CartItemView {
    fn from(line: CartLine) -> Self {
        let line_price = line.price * Decimal::from(line.quantity);
        Self {
            id: line.item_id(),
            product_id: ProductId::new(line.product_id),
            name: line.name,
            neural_tag: line.neural_tag,
            price: line.price,
            quantity: line.quantity,
            line_price,
            consciousness_level: line.consciousness_level,
        }
    }
}

/// Cart contents response body.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart_items: Vec<CartItemView>,
    pub total_items: i64,
    pub total_price: Decimal,
    pub neural_status: &'static str,
}

/// Query parameters naming the cart owner.
#[derive(Debug, Deserialize)]
pub struct UserParams {
    pub user_id: Option<i64>,
}

/// Fetch a user's cart with totals.
///
/// GET /cart?user_id=N
///
/// # Errors
///
/// Returns `AppError::BadRequest` without a user id.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> Result<Json<CartResponse>> {
    let user_id = params
        .user_id
        .map(UserId::new)
        .ok_or_else(|| AppError::BadRequest("User ID required".to_string()))?;

    let lines = CartRepository::new(state.pool())
        .lines_for_user(user_id)
        .await?;

    let total_items: i64 = lines.iter().map(|l| i64::from(l.quantity)).sum();
    let total_price: Decimal = lines
        .iter()
        .map(|l| l.price * Decimal::from(l.quantity))
        .sum();

    Ok(Json(CartResponse {
        cart_items: lines.into_iter().map(CartItemView::from).collect(),
        total_items,
        total_price,
        neural_status: "SYNCED",
    }))
}

/// Request body for adding to a cart.
#[derive(Debug, Deserialize)]
pub struct AddToCart {
    pub user_id: i64,
    pub product_id: i64,
    /// Defaults to one; anything below one is lifted to one.
    pub quantity: Option<i32>,
}

/// Add a product to a cart.
///
/// POST /cart
///
/// # Errors
///
/// Returns `AppError::Database` if the product does not exist (foreign
/// key) or the write fails.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddToCart>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let quantity = body.quantity.unwrap_or(1).max(1);

    let item_id = CartRepository::new(state.pool())
        .add(UserId::new(body.user_id), ProductId::new(body.product_id), quantity)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "id": item_id })),
    ))
}

/// Query parameters naming a cart line.
#[derive(Debug, Deserialize)]
pub struct ItemParams {
    pub id: Option<i64>,
}

/// Request body for a quantity change.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantity {
    pub quantity: i32,
}

/// Replace a cart line's quantity.
///
/// PUT /cart?id=N
///
/// # Errors
///
/// Returns `AppError::BadRequest` without an item id, `AppError::NotFound`
/// for an unknown line.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Query(params): Query<ItemParams>,
    Json(body): Json<UpdateQuantity>,
) -> Result<Json<serde_json::Value>> {
    let item_id = require_item_id(params)?;

    CartRepository::new(state.pool())
        .set_quantity(item_id, body.quantity.max(1))
        .await?;

    Ok(Json(json!({ "success": true })))
}

/// Remove a cart line.
///
/// DELETE /cart?id=N
///
/// # Errors
///
/// Returns `AppError::BadRequest` without an item id, `AppError::NotFound`
/// for an unknown line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Query(params): Query<ItemParams>,
) -> Result<Json<serde_json::Value>> {
    let item_id = require_item_id(params)?;

    CartRepository::new(state.pool()).remove(item_id).await?;

    Ok(Json(json!({ "success": true })))
}

fn require_item_id(params: ItemParams) -> Result<CartItemId> {
    params
        .id
        .map(CartItemId::new)
        .ok_or_else(|| AppError::BadRequest("Cart item ID required".to_string()))
}
