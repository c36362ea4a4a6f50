//! Wishlist state.
//!
//! A deduplicated list of saved product snapshots, persisted after every
//! change with the same failure tolerance as the cart.

use std::sync::Arc;

use flutter_store_core::Product;

use crate::storage::{JsonCollection, LocalStorage, keys};

/// The shopper's saved products.
#[derive(Debug)]
pub struct WishlistStore {
    items: Vec<Product>,
    storage: JsonCollection<Product>,
}

impl WishlistStore {
    /// Build a wishlist from whatever `storage` holds.
    ///
    /// Unreadable data yields an empty wishlist; repeated IDs keep their first
    /// occurrence.
    #[must_use]
    pub fn open(storage: JsonCollection<Product>) -> Self {
        let mut items: Vec<Product> = Vec::new();
        for product in storage.load() {
            if !items.iter().any(|p| p.id == product.id) {
                items.push(product);
            }
        }
        tracing::debug!(items = items.len(), "Wishlist loaded");
        Self { items, storage }
    }

    /// Build a wishlist over the standard wishlist key in `storage`.
    #[must_use]
    pub fn with_storage(storage: Arc<dyn LocalStorage>) -> Self {
        Self::open(JsonCollection::new(storage, keys::WISHLIST))
    }

    /// Saved products in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Number of saved products.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    /// Whether a product is saved.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &str) -> bool {
        self.items.iter().any(|p| p.id == product_id)
    }

    /// Save a product. Returns `false` if it was already saved.
    pub fn add_to_wishlist(&mut self, product: &Product) -> bool {
        if self.is_in_wishlist(product.id.as_str()) {
            return false;
        }
        self.items.push(product.clone());
        tracing::debug!(product_id = %product.id, "Added to wishlist");
        self.persist();
        true
    }

    /// Unsave a product. Returns `false` if it was not saved.
    pub fn remove_from_wishlist(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|p| p.id != product_id);
        if self.items.len() == before {
            return false;
        }
        tracing::debug!(product_id, "Removed from wishlist");
        self.persist();
        true
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.items) {
            tracing::error!(key = self.storage.key(), error = %e, "Failed to persist wishlist");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::storage::MemoryStorage;

    fn store() -> (Arc<MemoryStorage>, WishlistStore) {
        let storage = Arc::new(MemoryStorage::new());
        let wishlist = WishlistStore::with_storage(Arc::clone(&storage) as Arc<dyn LocalStorage>);
        (storage, wishlist)
    }

    #[test]
    fn test_add_is_idempotent() {
        let catalog = Catalog::bundled().unwrap();
        let product = catalog.get("tshirt-dash-mascot").unwrap();
        let (_, mut wishlist) = store();

        assert!(wishlist.add_to_wishlist(product));
        assert!(!wishlist.add_to_wishlist(product));
        assert_eq!(wishlist.total_items(), 1);
        assert!(wishlist.is_in_wishlist("tshirt-dash-mascot"));
    }

    #[test]
    fn test_remove() {
        let catalog = Catalog::bundled().unwrap();
        let (_, mut wishlist) = store();
        wishlist.add_to_wishlist(catalog.get("tshirt-dash-mascot").unwrap());
        wishlist.add_to_wishlist(catalog.get("hoodie-widget-tree").unwrap());

        assert!(wishlist.remove_from_wishlist("tshirt-dash-mascot"));
        assert!(!wishlist.remove_from_wishlist("tshirt-dash-mascot"));
        assert!(!wishlist.is_in_wishlist("tshirt-dash-mascot"));
        assert_eq!(wishlist.total_items(), 1);
        assert_eq!(wishlist.items()[0].id, "hoodie-widget-tree");
    }

    #[test]
    fn test_persist_and_rehydrate_full_snapshot() {
        let catalog = Catalog::bundled().unwrap();
        let product = catalog.get("hoodie-fluttercon-2025").unwrap();
        let (storage, mut wishlist) = store();
        wishlist.add_to_wishlist(product);

        let reopened = WishlistStore::with_storage(storage as Arc<dyn LocalStorage>);
        assert_eq!(reopened.items(), std::slice::from_ref(product));
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        let catalog = Catalog::bundled().unwrap();
        let (storage, mut wishlist) = store();
        storage.set_fail_writes(true);

        assert!(wishlist.add_to_wishlist(catalog.get("tshirt-code-flutter").unwrap()));
        assert_eq!(wishlist.total_items(), 1);
        assert_eq!(storage.get_item(keys::WISHLIST).unwrap(), None);
    }

    #[test]
    fn test_unreadable_storage_opens_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(keys::WISHLIST, "[{\"id\": 1}]").unwrap();

        let wishlist = WishlistStore::with_storage(storage as Arc<dyn LocalStorage>);
        assert_eq!(wishlist.total_items(), 0);
    }

    #[test]
    fn test_open_drops_duplicate_ids() {
        let catalog = Catalog::bundled().unwrap();
        let product = catalog.get("tshirt-dash-mascot").unwrap();
        let storage = Arc::new(MemoryStorage::new());
        let json = serde_json::to_string(&[product, product]).unwrap();
        storage.set_item(keys::WISHLIST, &json).unwrap();

        let wishlist = WishlistStore::with_storage(storage as Arc<dyn LocalStorage>);
        assert_eq!(wishlist.total_items(), 1);
    }
}
