//! Multi-field product filtering.
//!
//! Every active constraint must hold (AND). Inside a multi-valued constraint
//! one match is enough (OR). An empty selection set is inactive, and the
//! quick filters only ever *require* a flag; `false` never excludes anything.

use std::collections::BTreeSet;

use flutter_store_core::{Category, Price, Product};
use serde::{Deserialize, Serialize};

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Price,
    pub max: Price,
}

impl PriceRange {
    /// A range that admits every price.
    pub const FULL: Self = Self {
        min: Price::ZERO,
        max: Price::new(u64::MAX),
    };

    /// `[0, max]`, the default slider range for a product set.
    #[must_use]
    pub const fn up_to(max: Price) -> Self {
        Self {
            min: Price::ZERO,
            max,
        }
    }

    /// Whether `price` lies within the bounds, both ends included.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::FULL
    }
}

/// The catalog constraints a shopper has selected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub sizes: BTreeSet<String>,
    pub colors: BTreeSet<String>,
    pub categories: BTreeSet<Category>,
    pub price_range: PriceRange,
    pub new_only: bool,
    pub bestseller_only: bool,
    pub exclusive_only: bool,
}

impl FilterSpec {
    /// No constraints, with the price range spanning `[0, max_price]`.
    #[must_use]
    pub fn unconstrained(max_price: Price) -> Self {
        Self {
            price_range: PriceRange::up_to(max_price),
            ..Self::default()
        }
    }

    /// Whether `product` satisfies every active constraint.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product)
            && self.matches_size(product)
            && self.matches_color(product)
            && self.price_range.contains(product.price)
            && (!self.new_only || product.is_new)
            && (!self.bestseller_only || product.is_bestseller)
            && (!self.exclusive_only || product.event_exclusive)
    }

    /// Whether `product` satisfies the category constraint alone.
    ///
    /// Listing views use this to scope facets before the other filters apply.
    #[must_use]
    pub fn matches_category(&self, product: &Product) -> bool {
        self.categories.is_empty() || self.categories.contains(&product.category)
    }

    fn matches_size(&self, product: &Product) -> bool {
        self.sizes.is_empty() || product.sizes.iter().any(|s| self.sizes.contains(s))
    }

    fn matches_color(&self, product: &Product) -> bool {
        self.colors.is_empty() || product.colors.iter().any(|c| self.colors.contains(&c.name))
    }

    /// Number of active constraints, as shown on the filter badge.
    ///
    /// Each selected size and color counts once; a price range narrower than
    /// `[0, max_price]` counts once; each enabled quick filter counts once.
    /// Categories come from navigation and are not counted.
    #[must_use]
    pub fn active_count(&self, max_price: Price) -> usize {
        let narrowed =
            self.price_range.min > Price::ZERO || self.price_range.max < max_price;

        self.sizes.len()
            + self.colors.len()
            + usize::from(narrowed)
            + usize::from(self.new_only)
            + usize::from(self.bestseller_only)
            + usize::from(self.exclusive_only)
    }
}

/// Keep the products matching `criteria`, preserving input order.
pub fn filter_products<'a, I>(products: I, criteria: &FilterSpec) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products.into_iter().filter(|p| criteria.matches(p)).collect()
}
