//! Wishlist route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use flutter_store_core::Product;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::to_json;
use crate::state::AppState;

/// Wishlist response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView<'a> {
    pub items: &'a [Product],
    pub total_items: usize,
}

/// Membership check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistStatus {
    pub in_wishlist: bool,
}

/// Add or remove request.
#[derive(Debug, Deserialize)]
pub struct WishlistRequest {
    pub product_id: String,
}

/// Show the wishlist.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let wishlist = state.wishlist().lock().await;
    to_json(&WishlistView {
        items: wishlist.items(),
        total_items: wishlist.total_items(),
    })
}

/// Whether a product is saved.
#[instrument(skip(state))]
pub async fn status(State(state): State<AppState>, Path(id): Path<String>) -> Json<WishlistStatus> {
    let in_wishlist = state.wishlist().lock().await.is_in_wishlist(&id);
    Json(WishlistStatus { in_wishlist })
}

/// Save a catalog product.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<WishlistRequest>,
) -> Result<Json<serde_json::Value>> {
    let product = state
        .catalog()
        .get(&request.product_id)
        .ok_or_else(|| AppError::NotFound(format!("Product not found: {}", request.product_id)))?;

    let mut wishlist = state.wishlist().lock().await;
    if wishlist.add_to_wishlist(product) {
        add_breadcrumb(
            "wishlist",
            "Added to wishlist",
            Some(&[("product_id", product.id.as_str())]),
        );
    }
    to_json(&WishlistView {
        items: wishlist.items(),
        total_items: wishlist.total_items(),
    })
}

/// Unsave a product. Unknown IDs are ignored.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<WishlistRequest>,
) -> Result<Json<serde_json::Value>> {
    let mut wishlist = state.wishlist().lock().await;
    if wishlist.remove_from_wishlist(&request.product_id) {
        add_breadcrumb(
            "wishlist",
            "Removed from wishlist",
            Some(&[("product_id", request.product_id.as_str())]),
        );
    }
    to_json(&WishlistView {
        items: wishlist.items(),
        total_items: wishlist.total_items(),
    })
}
