//! Cart state.
//!
//! The cart is an ordered list of line items keyed by
//! `(product_id, size, color)`. Each line keeps a snapshot of the product's
//! name, price, image and category from the moment it was added, so later
//! catalog changes do not reprice an open cart.
//!
//! Every mutation rewrites the whole list to local storage. A failed write is
//! logged and otherwise ignored: the in-memory cart stays authoritative for
//! the rest of the session.

use std::sync::Arc;

use flutter_store_core::{Category, Price, Product, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{JsonCollection, LocalStorage, keys};

/// One cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    #[serde(alias = "id")]
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub category: Category,
}

impl CartLineItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.quantity)
    }

    fn is(&self, product_id: &str, size: &str, color: &str) -> bool {
        self.product_id == product_id && self.size == size && self.color == color
    }
}

/// Why a size/color selection cannot be added to the cart.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please select a size")]
    Size,
    #[error("Please select a color")]
    Color,
}

/// Arguments for [`CartStore::add_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub size: String,
    pub color: String,
    pub category: Category,
    pub quantity: u32,
}

impl NewLineItem {
    /// Snapshot `product` in the chosen size and color, quantity 1.
    ///
    /// The image is the lead image for the chosen color.
    #[must_use]
    pub fn for_product(product: &Product, size: &str, color: &str) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image_for_color(color).unwrap_or_default().to_string(),
            size: size.to_string(),
            color: color.to_string(),
            category: product.category,
            quantity: 1,
        }
    }

    /// Snapshot `product` after checking the shopper picked a size and a
    /// color the product actually comes in.
    ///
    /// # Errors
    ///
    /// Returns the first missing or unknown choice, size before color.
    pub fn select(
        product: &Product,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Result<Self, SelectionError> {
        let size = size
            .map(str::trim)
            .filter(|s| product.offers_size(s))
            .ok_or(SelectionError::Size)?;
        let color = color
            .map(str::trim)
            .filter(|c| product.offers_color(c))
            .ok_or(SelectionError::Color)?;
        Ok(Self::for_product(product, size, color))
    }

    /// Set the quantity to add.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

/// The shopper's cart.
#[derive(Debug)]
pub struct CartStore {
    lines: Vec<CartLineItem>,
    storage: JsonCollection<CartLineItem>,
}

impl CartStore {
    /// Build a cart from whatever `storage` holds.
    ///
    /// Unreadable or corrupted data yields an empty cart. Stored lines that
    /// share a key are merged and zero-quantity lines are dropped.
    #[must_use]
    pub fn open(storage: JsonCollection<CartLineItem>) -> Self {
        let mut store = Self {
            lines: Vec::new(),
            storage,
        };
        for line in store.storage.load() {
            if line.quantity == 0 {
                continue;
            }
            match store.position(line.product_id.as_str(), &line.size, &line.color) {
                Some(index) => {
                    if let Some(existing) = store.lines.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(line.quantity);
                    }
                }
                None => store.lines.push(line),
            }
        }
        tracing::debug!(lines = store.lines.len(), "Cart loaded");
        store
    }

    /// Build a cart over the standard cart key in `storage`.
    #[must_use]
    pub fn with_storage(storage: Arc<dyn LocalStorage>) -> Self {
        Self::open(JsonCollection::new(storage, keys::CART))
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up the line for a key.
    #[must_use]
    pub fn get(&self, product_id: &str, size: &str, color: &str) -> Option<&CartLineItem> {
        self.lines.iter().find(|l| l.is(product_id, size, color))
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines.iter().map(CartLineItem::subtotal).sum()
    }

    /// Add an item, merging into an existing line with the same key.
    ///
    /// Size and color are not checked against the product; callers validate
    /// before adding. A zero quantity changes nothing.
    pub fn add_item(&mut self, item: NewLineItem) {
        if item.quantity == 0 {
            tracing::debug!(product_id = %item.product_id, "Ignoring add of zero quantity");
            return;
        }

        let existing = self
            .lines
            .iter_mut()
            .find(|l| l.is(item.product_id.as_str(), &item.size, &item.color));

        if let Some(line) = existing {
            line.quantity = line.quantity.saturating_add(item.quantity);
            tracing::debug!(
                product_id = %line.product_id,
                size = %line.size,
                color = %line.color,
                quantity = line.quantity,
                "Cart line incremented"
            );
        } else {
            tracing::debug!(
                product_id = %item.product_id,
                size = %item.size,
                color = %item.color,
                quantity = item.quantity,
                "Cart line added"
            );
            self.lines.push(CartLineItem {
                product_id: item.product_id,
                name: item.name,
                price: item.price,
                image: item.image,
                size: item.size,
                color: item.color,
                quantity: item.quantity,
                category: item.category,
            });
        }

        self.persist();
    }

    /// Set a line's quantity. Zero or less removes the line.
    ///
    /// Returns `false` (and changes nothing) if no line has this key.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> bool {
        let Some(index) = self.position(product_id, size, color) else {
            return false;
        };

        if quantity <= 0 {
            self.lines.remove(index);
        } else if let Some(line) = self.lines.get_mut(index) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }

        self.persist();
        true
    }

    /// Remove a line. Returns `false` if no line has this key.
    pub fn remove_item(&mut self, product_id: &str, size: &str, color: &str) -> bool {
        let Some(index) = self.position(product_id, size, color) else {
            return false;
        };
        self.lines.remove(index);
        self.persist();
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    fn position(&self, product_id: &str, size: &str, color: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.is(product_id, size, color))
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.lines) {
            tracing::error!(key = self.storage.key(), error = %e, "Failed to persist cart");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn item(product_id: &str, price: u64, size: &str, color: &str) -> NewLineItem {
        NewLineItem {
            product_id: ProductId::new(product_id),
            name: format!("Product {product_id}"),
            price: Price::new(price),
            image: format!("/images/{product_id}.png"),
            size: size.to_string(),
            color: color.to_string(),
            category: Category::Tshirt,
            quantity: 1,
        }
    }

    fn store() -> (Arc<MemoryStorage>, CartStore) {
        let storage = Arc::new(MemoryStorage::new());
        let cart = CartStore::with_storage(Arc::clone(&storage) as Arc<dyn LocalStorage>);
        (storage, cart)
    }

    #[test]
    fn test_repeated_adds_merge_into_one_line() {
        let (_, mut cart) = store();
        for _ in 0..5 {
            cart.add_item(item("tee", 799, "M", "Black"));
        }

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.get("tee", "M", "Black").unwrap().quantity, 5);
    }

    #[test]
    fn test_distinct_keys_make_distinct_lines() {
        let (_, mut cart) = store();
        cart.add_item(item("tee", 799, "M", "Black"));
        cart.add_item(item("tee", 799, "L", "Black"));
        cart.add_item(item("tee", 799, "M", "White"));
        cart.add_item(item("hoodie", 1999, "M", "Black"));

        assert_eq!(cart.items().len(), 4);
        assert_eq!(cart.total_items(), 4);
    }

    #[test]
    fn test_add_with_quantity() {
        let (_, mut cart) = store();
        cart.add_item(item("tee", 799, "M", "Black").with_quantity(3));
        cart.add_item(item("tee", 799, "M", "Black").with_quantity(2));
        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price(), Price::new(3995));
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let (storage, mut cart) = store();
        cart.add_item(item("tee", 799, "M", "Black").with_quantity(0));
        assert!(cart.is_empty());
        assert_eq!(storage.get_item(keys::CART).unwrap(), None);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let (_, mut cart) = store();
        cart.add_item(item("tee", 799, "M", "Black"));

        assert!(cart.update_quantity("tee", "M", "Black", 4));
        assert_eq!(cart.total_items(), 4);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let (_, mut cart) = store();
        cart.add_item(item("tee", 799, "M", "Black"));
        cart.add_item(item("hoodie", 1999, "L", "White"));

        assert!(cart.update_quantity("tee", "M", "Black", 0));
        assert!(cart.get("tee", "M", "Black").is_none());

        assert!(cart.update_quantity("hoodie", "L", "White", -3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_missing_line_is_noop() {
        let (_, mut cart) = store();
        cart.add_item(item("tee", 799, "M", "Black"));

        assert!(!cart.update_quantity("tee", "S", "Black", 7));
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_update_quantity_clamps_huge_values() {
        let (_, mut cart) = store();
        cart.add_item(item("tee", 1, "M", "Black"));
        assert!(cart.update_quantity("tee", "M", "Black", i64::MAX));
        assert_eq!(cart.get("tee", "M", "Black").unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_remove_item() {
        let (_, mut cart) = store();
        cart.add_item(item("tee", 799, "M", "Black"));

        assert!(!cart.remove_item("tee", "M", "White"));
        assert!(cart.remove_item("tee", "M", "Black"));
        assert!(!cart.remove_item("tee", "M", "Black"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_price_tracks_interleaved_mutations() {
        let (_, mut cart) = store();
        let expected = |cart: &CartStore| {
            cart.items()
                .iter()
                .map(|l| l.price.rupees() * u64::from(l.quantity))
                .sum::<u64>()
        };

        cart.add_item(item("a", 1000, "S", "Black"));
        cart.add_item(item("b", 2000, "L", "White").with_quantity(2));
        assert_eq!(cart.total_price().rupees(), expected(&cart));
        assert_eq!(cart.total_price(), Price::new(5000));

        cart.update_quantity("a", "S", "Black", 3);
        assert_eq!(cart.total_price().rupees(), expected(&cart));

        cart.add_item(item("a", 1000, "S", "Black"));
        cart.remove_item("b", "L", "White");
        assert_eq!(cart.total_price().rupees(), expected(&cart));
        assert_eq!(cart.total_price(), Price::new(4000));

        cart.clear();
        assert_eq!(cart.total_price(), Price::ZERO);
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_mutations_persist_and_rehydrate() {
        let (storage, mut cart) = store();
        cart.add_item(item("tee", 799, "M", "Black").with_quantity(2));
        cart.add_item(item("hoodie", 1999, "L", "White"));

        let reopened = CartStore::with_storage(storage as Arc<dyn LocalStorage>);
        assert_eq!(reopened.items(), cart.items());
        assert_eq!(reopened.total_price(), Price::new(3597));
    }

    #[test]
    fn test_storage_layout_uses_camel_case_fields() {
        let (storage, mut cart) = store();
        cart.add_item(item("tee", 799, "M", "Black"));

        let raw = storage.get_item(keys::CART).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let line = &value[0];
        assert_eq!(line["productId"], "tee");
        assert_eq!(line["price"], 799);
        assert_eq!(line["quantity"], 1);
        assert_eq!(line["category"], "tshirt");
    }

    #[test]
    fn test_clear_persists_empty_list() {
        let (storage, mut cart) = store();
        cart.add_item(item("tee", 799, "M", "Black"));
        cart.clear();
        assert_eq!(storage.get_item(keys::CART).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        let (storage, mut cart) = store();
        cart.add_item(item("tee", 799, "M", "Black"));
        storage.set_fail_writes(true);

        cart.add_item(item("tee", 799, "M", "Black"));
        cart.add_item(item("hoodie", 1999, "L", "White"));

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.items().len(), 2);

        // Storage still holds the last successful write.
        storage.set_fail_writes(false);
        let reopened = CartStore::with_storage(storage as Arc<dyn LocalStorage>);
        assert_eq!(reopened.total_items(), 1);
    }

    #[test]
    fn test_corrupted_storage_opens_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(keys::CART, "not json").unwrap();

        let cart = CartStore::with_storage(storage as Arc<dyn LocalStorage>);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_open_normalizes_stored_lines() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set_item(
                keys::CART,
                r#"[
                    {"id":"tee","name":"Tee","price":799,"image":"","size":"M","color":"Black","quantity":1,"category":"tshirt"},
                    {"productId":"tee","name":"Tee","price":799,"image":"","size":"M","color":"Black","quantity":2,"category":"tshirt"},
                    {"productId":"cap","name":"Cap","price":99,"image":"","size":"M","color":"Black","quantity":0,"category":"tshirt"}
                ]"#,
            )
            .unwrap();

        let cart = CartStore::with_storage(storage as Arc<dyn LocalStorage>);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_for_product_snapshots_color_image() {
        let catalog = crate::catalog::Catalog::bundled().unwrap();
        let product = catalog.get("hoodie-dash-mascot").unwrap();

        let new = NewLineItem::for_product(product, "L", "Black");
        assert_eq!(new.image, "/images/2-h-black.png");
        assert_eq!(new.price, Price::new(2299));
        assert_eq!(new.category, Category::Hoodie);
        assert_eq!(new.quantity, 1);
    }

    #[test]
    fn test_select_requires_offered_size_then_color() {
        let catalog = crate::catalog::Catalog::bundled().unwrap();
        let product = catalog.get("tshirt-dash-mascot").unwrap();

        assert_eq!(
            NewLineItem::select(product, None, None),
            Err(SelectionError::Size)
        );
        assert_eq!(
            NewLineItem::select(product, Some("XXXXL"), Some("Black")),
            Err(SelectionError::Size)
        );
        assert_eq!(
            NewLineItem::select(product, Some("M"), Some("Purple")),
            Err(SelectionError::Color)
        );
        assert_eq!(
            SelectionError::Color.to_string(),
            "Please select a color"
        );

        let new = NewLineItem::select(product, Some(" M "), Some("White")).unwrap();
        assert_eq!(new.size, "M");
        assert_eq!(new.color, "White");
    }
}
