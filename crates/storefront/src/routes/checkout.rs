//! Checkout JSON endpoint.
//!
//! The order total is recomputed server-side from the catalog: the
//! client sends product ids and quantities, never prices. An optional
//! `expected_total` lets the frontend detect that prices moved under it
//! before any charge is attempted.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use dem_claire_core::{
    Cart, ExpressCheckout, PaymentMethod, PaymentOutcome, Product, ProductId,
};

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// One requested order line.
#[derive(Debug, Deserialize)]
pub struct OrderLine {
    pub product_id: i64,
    pub quantity: u32,
}

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<OrderLine>,
    pub email: String,
    /// Defaults to PIX, matching the express screen.
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub terms_accepted: bool,
    /// Total the client showed the shopper, for drift detection.
    pub expected_total: Option<Decimal>,
}

/// Checkout response body. `outcome` flattens to the gateway verdict.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: PaymentOutcome,
    pub payment_method: PaymentMethod,
    pub total: Decimal,
    pub total_items: u32,
}

/// Place an order.
///
/// POST /checkout
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an empty order, unaccepted terms,
/// a zero quantity, unknown products, or a stale expected total.
#[instrument(skip(state, body), fields(lines = body.items.len()))]
pub async fn place_order(
    State(state): State<AppState>,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    if !body.terms_accepted {
        return Err(AppError::BadRequest("Terms must be accepted".to_string()));
    }
    if body.items.is_empty() {
        return Err(AppError::BadRequest("Order is empty".to_string()));
    }

    let cart = build_cart(&state, &body.items).await?;
    let total = cart.total_price().amount;

    if let Some(expected) = body.expected_total
        && expected != total
    {
        return Err(AppError::BadRequest(format!(
            "Order total changed: expected {expected}, now {total}"
        )));
    }

    let method = body.payment_method.unwrap_or(PaymentMethod::Pix);

    let mut express = ExpressCheckout::new();
    express.select(method);
    express.set_email(body.email.clone());
    let email = express
        .begin()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let outcome = state.gateway().authorize(total).await;
    express.resolve(outcome);

    info!(
        email = email.as_str(),
        method = method.name(),
        %total,
        ?outcome,
        "checkout resolved"
    );

    Ok(Json(CheckoutResponse {
        success: outcome == PaymentOutcome::Approved,
        outcome,
        payment_method: method,
        total,
        total_items: cart.total_items(),
    }))
}

/// Rebuild the order server-side from catalog prices.
async fn build_cart(state: &AppState, items: &[OrderLine]) -> Result<Cart> {
    let lines = collapse_lines(items)?;
    let ids: Vec<ProductId> = lines.iter().map(|(id, _)| *id).collect();
    let products = ProductRepository::new(state.pool()).get_many(&ids).await?;

    let mut cart = Cart::new();
    for (id, quantity) in lines {
        let product: &Product = products.iter().find(|p| p.id == id).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown product: {}", id.as_i64()))
        })?;
        cart.add_item(product.clone());
        cart.set_quantity(id, quantity);
    }

    Ok(cart)
}

/// Validate order lines before any money is involved.
///
/// The cart clamps a zero quantity up to 1 for the benefit of the shop
/// UI; here a zero quantity is a malformed order and gets rejected.
/// Repeated product ids are merged by summing their quantities.
fn collapse_lines(items: &[OrderLine]) -> Result<Vec<(ProductId, u32)>> {
    let mut collapsed: Vec<(ProductId, u32)> = Vec::with_capacity(items.len());

    for line in items {
        if line.quantity == 0 {
            return Err(AppError::BadRequest(format!(
                "Invalid quantity for product {}",
                line.product_id
            )));
        }
        let id = ProductId::new(line.product_id);
        match collapsed.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, quantity)) => *quantity = quantity.saturating_add(line.quantity),
            None => collapsed.push((id, line.quantity)),
        }
    }

    Ok(collapsed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(product_id: i64, quantity: u32) -> OrderLine {
        OrderLine {
            product_id,
            quantity,
        }
    }

    #[test]
    fn test_zero_quantity_line_is_rejected() {
        let result = collapse_lines(&[line(1, 2), line(2, 0)]);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_duplicate_lines_sum_quantities() {
        let collapsed = collapse_lines(&[line(7, 3), line(9, 1), line(7, 2)]).unwrap();
        assert_eq!(
            collapsed,
            vec![(ProductId::new(7), 5), (ProductId::new(9), 1)]
        );
    }

    #[test]
    fn test_distinct_lines_pass_through_in_order() {
        let collapsed = collapse_lines(&[line(3, 1), line(1, 4)]).unwrap();
        assert_eq!(
            collapsed,
            vec![(ProductId::new(3), 1), (ProductId::new(1), 4)]
        );
    }
}
