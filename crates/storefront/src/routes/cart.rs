//! Cart route handlers.
//!
//! Every mutating handler answers with the full cart so clients never need a
//! follow-up read to refresh totals.

use axum::{Json, extract::State};
use flutter_store_core::Price;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::cart::{CartLineItem, CartStore, NewLineItem};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::to_json;
use crate::state::AppState;

/// Cart line with its subtotal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView<'a> {
    #[serde(flatten)]
    pub line: &'a CartLineItem,
    pub subtotal: Price,
}

/// Cart response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView<'a> {
    pub items: Vec<CartLineView<'a>>,
    pub total_items: u64,
    pub total_price: Price,
    pub total_display: String,
}

impl<'a> From<&'a CartStore> for CartView<'a> {
    fn from(cart: &'a CartStore) -> Self {
        let total_price = cart.total_price();
        Self {
            items: cart
                .items()
                .iter()
                .map(|line| CartLineView {
                    line,
                    subtotal: line.subtotal(),
                })
                .collect(),
            total_items: cart.total_items(),
            total_price,
            total_display: total_price.to_string(),
        }
    }
}

/// Cart badge count.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Add to cart request.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: Option<u32>,
}

/// Update quantity request. Zero or negative removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: String,
    pub size: String,
    pub color: String,
    pub quantity: i64,
}

/// Remove line request.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: String,
    pub size: String,
    pub color: String,
}

/// Show the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let cart = state.cart().lock().await;
    to_json(&CartView::from(&*cart))
}

/// Cart item count for the header badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    let count = state.cart().lock().await.total_items();
    Json(CartCount { count })
}

/// Add a product in the selected size and color.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<serde_json::Value>> {
    let product = state
        .catalog()
        .get(&request.product_id)
        .ok_or_else(|| AppError::NotFound(format!("Product not found: {}", request.product_id)))?;

    let quantity = request.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest(
            "Quantity must be at least 1".to_string(),
        ));
    }

    let item = NewLineItem::select(product, request.size.as_deref(), request.color.as_deref())
        .map_err(|e| AppError::BadRequest(e.to_string()))?
        .with_quantity(quantity);

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[
            ("product_id", item.product_id.as_str()),
            ("size", item.size.as_str()),
            ("color", item.color.as_str()),
        ]),
    );

    let mut cart = state.cart().lock().await;
    cart.add_item(item);
    to_json(&CartView::from(&*cart))
}

/// Set a line's quantity.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<serde_json::Value>> {
    let mut cart = state.cart().lock().await;
    if !cart.update_quantity(
        &request.product_id,
        &request.size,
        &request.color,
        request.quantity,
    ) {
        tracing::debug!(product_id = %request.product_id, "Update for line not in cart ignored");
    }
    to_json(&CartView::from(&*cart))
}

/// Remove a line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<serde_json::Value>> {
    let mut cart = state.cart().lock().await;
    if cart.remove_item(&request.product_id, &request.size, &request.color) {
        add_breadcrumb(
            "cart",
            "Removed from cart",
            Some(&[("product_id", request.product_id.as_str())]),
        );
    }
    to_json(&CartView::from(&*cart))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let mut cart = state.cart().lock().await;
    cart.clear();
    to_json(&CartView::from(&*cart))
}
