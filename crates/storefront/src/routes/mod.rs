//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (storage writable and readable)
//!
//! # Products
//! GET  /api/products           - Filtered listing with facets
//! GET  /api/products/featured  - New, bestseller and event-exclusive products
//! GET  /api/products/{id}      - Product detail with related products
//!
//! # Cart
//! GET  /api/cart               - Lines and totals
//! GET  /api/cart/count         - Item count for the badge
//! POST /api/cart/add           - Add a product in a size and color
//! POST /api/cart/update        - Set a line's quantity
//! POST /api/cart/remove        - Remove a line
//! POST /api/cart/clear         - Empty the cart
//!
//! # Wishlist
//! GET  /api/wishlist           - Saved products
//! GET  /api/wishlist/{id}      - Whether a product is saved
//! POST /api/wishlist/add       - Save a product
//! POST /api/wishlist/remove    - Unsave a product
//!
//! # Checkout
//! POST /api/checkout           - Validate details, return WhatsApp link
//!
//! # Static
//! GET  /images/*               - Product images
//! ```

pub mod cart;
pub mod checkout;
pub mod products;
pub mod wishlist;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::{AppError, Result};
use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/featured", get(products::featured))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
        .route("/{id}", get(wishlist::status))
}

/// Create all API routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/wishlist", wishlist_routes())
        .route("/api/checkout", post(checkout::submit))
}

/// Build the complete application: routes, health checks, static images and
/// the middleware stack.
pub fn app(state: AppState) -> Router {
    let images = ServeDir::new(state.config().static_dir.join("images"));

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .nest_service("/images", images)
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the storage backend fails its health
/// check, e.g. because the data directory has gone away.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.check_storage() {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Serialize a view that borrows from locked state into an owned JSON body.
pub(crate) fn to_json<T: Serialize>(view: &T) -> Result<Json<serde_json::Value>> {
    serde_json::to_value(view)
        .map(Json)
        .map_err(|e| AppError::Internal(format!("failed to encode response: {e}")))
}
