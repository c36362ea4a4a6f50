//! Product route handlers.

use std::collections::BTreeSet;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use flutter_store_core::{Category, Price, Product};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::{Facets, FilterSpec, PriceRange, RELATED_LIMIT, filter_products};
use crate::error::{AppError, Result};
use crate::routes::to_json;
use crate::state::AppState;

/// Listing filter query. Multi-valued parameters are comma-separated.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub category: Option<String>,
    pub sizes: Option<String>,
    pub colors: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub bestseller: bool,
    #[serde(default)]
    pub exclusive: bool,
}

impl FilterQuery {
    /// Parse the category parameter.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an unknown category.
    fn categories(&self) -> Result<BTreeSet<Category>> {
        split_list(self.category.as_deref())
            .map(|c| {
                c.parse::<Category>()
                    .map_err(|e| AppError::BadRequest(e.to_string()))
            })
            .collect()
    }

    /// Build the filter, with an absent upper price bound meaning `max_price`.
    fn to_filter(&self, categories: BTreeSet<Category>, max_price: Price) -> FilterSpec {
        FilterSpec {
            sizes: split_list(self.sizes.as_deref()).map(String::from).collect(),
            colors: split_list(self.colors.as_deref()).map(String::from).collect(),
            categories,
            price_range: PriceRange {
                min: self.min_price.map_or(Price::ZERO, Price::new),
                max: self.max_price.map_or(max_price, Price::new),
            },
            new_only: self.new,
            bestseller_only: self.bestseller,
            exclusive_only: self.exclusive,
        }
    }
}

/// Split a comma-separated parameter, dropping blanks.
fn split_list(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// A product as listed, with derived display fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub discount_percent: u8,
    pub price_display: String,
}

impl<'a> From<&'a Product> for ProductView<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            product,
            discount_percent: product.discount_percent(),
            price_display: product.price.to_string(),
        }
    }
}

/// Listing response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListView<'a> {
    pub products: Vec<ProductView<'a>>,
    pub total: usize,
    /// Filter options offered by the products in the selected categories.
    pub facets: Facets,
    pub filters: FilterSpec,
    pub active_filters: usize,
}

/// Featured products response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedView<'a> {
    pub products: Vec<ProductView<'a>>,
    pub total: usize,
}

/// Detail response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailView<'a> {
    #[serde(flatten)]
    pub product: ProductView<'a>,
    pub in_wishlist: bool,
    pub related: Vec<ProductView<'a>>,
}

/// List products matching the query filters.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<serde_json::Value>> {
    let catalog = state.catalog();
    let categories = query.categories()?;

    // Facets follow the category scope so the controls never offer options
    // that cannot match.
    let scope = FilterSpec {
        categories: categories.clone(),
        ..FilterSpec::default()
    };
    let in_scope: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| scope.matches_category(p))
        .collect();
    let facets = Facets::collect(in_scope.iter().copied());

    let criteria = query.to_filter(categories, facets.max_price);
    let products: Vec<ProductView<'_>> = filter_products(in_scope.iter().copied(), &criteria)
        .into_iter()
        .map(ProductView::from)
        .collect();

    tracing::debug!(matched = products.len(), "Products filtered");

    let view = ProductListView {
        total: products.len(),
        products,
        active_filters: criteria.active_count(facets.max_price),
        facets,
        filters: criteria,
    };
    to_json(&view)
}

/// List the featured products for the home page.
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let products: Vec<ProductView<'_>> = state
        .catalog()
        .featured()
        .into_iter()
        .map(ProductView::from)
        .collect();

    let view = FeaturedView {
        total: products.len(),
        products,
    };
    to_json(&view)
}

/// Show one product with its related products.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let catalog = state.catalog();
    let product = catalog
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Product not found: {id}")))?;
    let in_wishlist = state.wishlist().lock().await.is_in_wishlist(&id);

    let view = ProductDetailView {
        product: ProductView::from(product),
        in_wishlist,
        related: catalog
            .related(product, RELATED_LIMIT)
            .into_iter()
            .map(ProductView::from)
            .collect(),
    };
    to_json(&view)
}
