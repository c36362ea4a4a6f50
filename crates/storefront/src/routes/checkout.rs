//! Checkout route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::checkout::{self, CheckoutForm, CheckoutHandoff};
use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Validate the delivery details and return the WhatsApp hand-off.
///
/// The cart is left as it is; the shopper may still abandon the chat.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<CheckoutHandoff>> {
    let cart = state.cart().lock().await;
    let handoff = checkout::prepare(&form, &cart, &state.config().whatsapp_number)
        .inspect_err(|e| tracing::info!(field = e.field(), error = %e, "Checkout rejected"))?;

    add_breadcrumb("checkout", "Checkout hand-off prepared", None);
    Ok(Json(handoff))
}
