//! Product catalog.
//!
//! The catalog is static data loaded once at start-up, either from the JSON
//! file bundled into the binary or from an override path. It is never mutated
//! afterwards, so it is shared freely between handlers.

mod filter;

use std::collections::HashSet;
use std::path::Path;

use flutter_store_core::{Category, ColorVariant, Price, Product};
use serde::Serialize;
use thiserror::Error;

pub use filter::{FilterSpec, PriceRange, filter_products};

/// Bundled catalog source.
const BUNDLED_CATALOG: &str = include_str!("../../data/products.json");

/// How many related products the detail view shows.
pub const RELATED_LIMIT: usize = 4;

/// Conventional apparel size ladder, used to order size facets.
const SIZE_ORDER: &[&str] = &["XS", "S", "M", "L", "XL", "XXL", "XXXL"];

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate product id in catalog: {0}")]
    DuplicateId(String),
}

/// The full, ordered product collection.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an ID.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.to_string()));
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or contains duplicate IDs.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled JSON is invalid.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products in `category`, in catalog order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Products flagged new, bestseller or event-exclusive, in catalog order.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_featured()).collect()
    }

    /// Up to `limit` other products from the same category.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.by_category(product.category)
            .filter(|p| p.id != product.id)
            .take(limit)
            .collect()
    }

    /// Highest price in the catalog.
    #[must_use]
    pub fn max_price(&self) -> Price {
        max_price(&self.products)
    }
}

/// Highest price among `products`, or zero for none.
#[must_use]
pub fn max_price<'a>(products: impl IntoIterator<Item = &'a Product>) -> Price {
    products
        .into_iter()
        .map(|p| p.price)
        .max()
        .unwrap_or(Price::ZERO)
}

/// Options offered by a set of products, used to build filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    /// Distinct sizes, ordered along the size ladder; unknown sizes last.
    pub sizes: Vec<String>,
    /// Distinct colors by name, in first-seen order.
    pub colors: Vec<ColorVariant>,
    /// Upper bound of the price slider.
    pub max_price: Price,
}

impl Facets {
    /// Collect the facets of `products`.
    #[must_use]
    pub fn collect<'a>(products: impl IntoIterator<Item = &'a Product> + Clone) -> Self {
        let mut sizes: Vec<String> = Vec::new();
        let mut colors: Vec<ColorVariant> = Vec::new();

        for product in products.clone() {
            for size in &product.sizes {
                if !sizes.contains(size) {
                    sizes.push(size.clone());
                }
            }
            for color in &product.colors {
                if !colors.iter().any(|c| c.name == color.name) {
                    colors.push(color.clone());
                }
            }
        }

        // Stable sort keeps first-seen order among sizes off the ladder.
        sizes.sort_by_key(|size| {
            SIZE_ORDER
                .iter()
                .position(|s| s.eq_ignore_ascii_case(size))
                .unwrap_or(SIZE_ORDER.len())
        });

        Self {
            sizes,
            colors,
            max_price: max_price(products),
        }
    }
}
