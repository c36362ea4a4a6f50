//! Integration tests for the Flutter Store storefront.
//!
//! The tests drive the full router in-process, middleware included, over
//! file-backed storage in a temporary directory. No server or network is
//! needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p flutter-store-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_api` - Catalog, cart, wishlist and checkout endpoints
//! - `persistence` - State surviving a restart over the same data directory

#![allow(clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use flutter_store_storefront::catalog::Catalog;
use flutter_store_storefront::checkout::WhatsAppNumber;
use flutter_store_storefront::config::StorefrontConfig;
use flutter_store_storefront::routes;
use flutter_store_storefront::state::AppState;
use flutter_store_storefront::storage::{FileStorage, LocalStorage};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Store WhatsApp number used by every test app.
pub const TEST_WHATSAPP_NUMBER: &str = "919876543210";

/// A storefront app over its own temporary data directory.
pub struct TestContext {
    pub data_dir: TempDir,
    pub app: Router,
}

impl TestContext {
    /// Start an app with an empty data directory.
    #[must_use]
    pub fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let app = build_app(&data_dir);
        Self { data_dir, app }
    }

    /// Start a fresh app over the same data directory, as after a restart.
    #[must_use]
    pub fn restart(self) -> Self {
        let app = build_app(&self.data_dir);
        Self {
            data_dir: self.data_dir,
            app,
        }
    }

    /// Issue a GET request, returning the status and JSON body.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Issue a POST request with a JSON body.
    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn build_app(data_dir: &TempDir) -> Router {
    let number = WhatsAppNumber::parse(TEST_WHATSAPP_NUMBER).expect("Invalid test number");
    let mut config = StorefrontConfig::local(number);
    config.data_dir = data_dir.path().to_path_buf();

    let storage: Arc<dyn LocalStorage> =
        Arc::new(FileStorage::open(data_dir.path()).expect("Failed to open storage"));
    let catalog = Catalog::bundled().expect("Bundled catalog is invalid");

    routes::app(AppState::new(config, catalog, storage))
}
