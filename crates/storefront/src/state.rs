//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::storage::{LocalStorage, StorageError};
use crate::wishlist::WishlistStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The server stands in for a
/// single shopper's device, so there is exactly one cart and one wishlist;
/// each sits behind its own lock so that a mutation and its persistence
/// happen as one step.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    storage: Arc<dyn LocalStorage>,
    cart: Mutex<CartStore>,
    wishlist: Mutex<WishlistStore>,
}

impl AppState {
    /// Create a new application state, rehydrating the cart and wishlist
    /// from `storage`.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, storage: Arc<dyn LocalStorage>) -> Self {
        let cart = CartStore::with_storage(Arc::clone(&storage));
        let wishlist = WishlistStore::with_storage(Arc::clone(&storage));

        tracing::info!(
            products = catalog.len(),
            cart_items = cart.total_items(),
            wishlist_items = wishlist.total_items(),
            "Application state initialized"
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                storage,
                cart: Mutex::new(cart),
                wishlist: Mutex::new(wishlist),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The cart, locked for the duration of one operation.
    #[must_use]
    pub fn cart(&self) -> &Mutex<CartStore> {
        &self.inner.cart
    }

    /// The wishlist, locked for the duration of one operation.
    #[must_use]
    pub fn wishlist(&self) -> &Mutex<WishlistStore> {
        &self.inner.wishlist
    }

    /// Verify the storage backend can be written and read.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the health check fails.
    pub fn check_storage(&self) -> Result<(), StorageError> {
        self.inner.storage.health_check()
    }
}
