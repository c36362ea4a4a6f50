//! Catalog browsing commands.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use clap::Args;
use flutter_store_core::{Category, Price, Product};
use flutter_store_storefront::catalog::{
    Catalog, Facets, FilterSpec, PriceRange, RELATED_LIMIT, filter_products,
};

use super::{CliError, Context};

/// Filters for `products`.
#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Category (hoodie, hoodies, tshirt, tshirts)
    #[arg(long)]
    pub category: Option<String>,

    /// Size to include; repeat for several
    #[arg(long = "size")]
    pub sizes: Vec<String>,

    /// Color to include; repeat for several
    #[arg(long = "color")]
    pub colors: Vec<String>,

    /// Lowest price in rupees
    #[arg(long)]
    pub min_price: Option<u64>,

    /// Highest price in rupees
    #[arg(long)]
    pub max_price: Option<u64>,

    /// Only new arrivals
    #[arg(long)]
    pub new: bool,

    /// Only bestsellers
    #[arg(long)]
    pub bestseller: bool,

    /// Only event exclusives
    #[arg(long)]
    pub exclusive: bool,

    /// Only featured products (new, bestseller or event exclusive)
    #[arg(long)]
    pub featured: bool,
}

impl ListArgs {
    fn categories(&self) -> Result<BTreeSet<Category>, CliError> {
        let category = self
            .category
            .as_deref()
            .map(str::parse::<Category>)
            .transpose()
            .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
        Ok(category.into_iter().collect())
    }

    /// Build the filter, with an absent upper price bound meaning `max_price`.
    fn to_filter(&self, categories: BTreeSet<Category>, max_price: Price) -> FilterSpec {
        FilterSpec {
            sizes: self.sizes.iter().cloned().collect(),
            colors: self.colors.iter().cloned().collect(),
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

/// List products matching the filters.
///
/// # Errors
///
/// Returns an error for an unknown category.
pub fn list(ctx: &Context, args: &ListArgs) -> Result<(), CliError> {
    let output = render_list(&ctx.catalog, args)?;
    #[allow(clippy::print_stdout)]
    {
        print!("{output}");
    }
    Ok(())
}

/// Show one product.
///
/// # Errors
///
/// Returns an error if no product has this ID.
pub fn show(ctx: &Context, id: &str) -> Result<(), CliError> {
    let output = render_product(&ctx.catalog, id)?;
    #[allow(clippy::print_stdout)]
    {
        print!("{output}");
    }
    Ok(())
}

fn render_list(catalog: &Catalog, args: &ListArgs) -> Result<String, CliError> {
    let categories = args.categories()?;

    // The category and featured flags pick the shelf; facets and the default
    // price bound come from that shelf alone, as on the storefront.
    let shelf = FilterSpec {
        categories: categories.clone(),
        ..FilterSpec::default()
    };
    let scope: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| shelf.matches_category(p) && (!args.featured || p.is_featured()))
        .collect();
    let facets = Facets::collect(scope.iter().copied());

    let criteria = args.to_filter(categories, facets.max_price);
    let matched = filter_products(scope.iter().copied(), &criteria);

    let mut out = String::new();
    for product in &matched {
        let _ = writeln!(out, "{}", product_line(product));
    }

    let active = criteria.active_count(facets.max_price);
    let _ = write!(out, "{} of {} products", matched.len(), scope.len());
    if active > 0 {
        let _ = write!(out, " ({active} filters active)");
    }
    out.push('\n');

    if matched.is_empty() {
        let colors: Vec<&str> = facets.colors.iter().map(|c| c.name.as_str()).collect();
        let _ = writeln!(
            out,
            "Available sizes: {}; colors: {}; prices up to {}",
            facets.sizes.join(", "),
            colors.join(", "),
            facets.max_price
        );
    }
    Ok(out)
}

fn render_product(catalog: &Catalog, id: &str) -> Result<String, CliError> {
    let product = catalog
        .get(id)
        .ok_or_else(|| CliError::ProductNotFound(id.to_string()))?;

    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", product.name, product.id);
    let _ = writeln!(out, "{}", product.category.title());
    match product.original_price {
        Some(original) => {
            let _ = writeln!(
                out,
                "{}  (was {}, {}% off)",
                product.price,
                original,
                product.discount_percent()
            );
        }
        None => {
            let _ = writeln!(out, "{}", product.price);
        }
    }
    let _ = writeln!(out, "{}", product.description);
    let _ = writeln!(out, "Sizes: {}", product.sizes.join(", "));
    let colors: Vec<&str> = product.colors.iter().map(|c| c.name.as_str()).collect();
    let _ = writeln!(out, "Colors: {}", colors.join(", "));
    if !product.in_stock {
        let _ = writeln!(out, "Out of stock");
    }

    let related = catalog.related(product, RELATED_LIMIT);
    if !related.is_empty() {
        let _ = writeln!(out, "\nYou may also like:");
        for other in related {
            let _ = writeln!(out, "  {}", product_line(other));
        }
    }
    Ok(out)
}

fn product_line(product: &Product) -> String {
    let mut badges = Vec::new();
    if product.is_new {
        badges.push("new");
    }
    if product.is_bestseller {
        badges.push("bestseller");
    }
    if product.event_exclusive {
        badges.push("exclusive");
    }

    let mut line = format!(
        "{:<24} {:<36} {:>8}",
        product.id.as_str(),
        product.name,
        product.price.to_string()
    );
    if !badges.is_empty() {
        let _ = write!(line, "  [{}]", badges.join(", "));
    }
    line
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::bundled().unwrap()
    }

    #[test]
    fn test_list_unfiltered_shows_everything() {
        let out = render_list(&catalog(), &ListArgs::default()).unwrap();
        assert!(out.contains("12 of 12 products\n"));
        assert!(!out.contains("filters active"));
    }

    #[test]
    fn test_list_filters_by_category_alias_and_flag() {
        let args = ListArgs {
            category: Some("T-Shirts".to_string()),
            exclusive: true,
            ..ListArgs::default()
        };
        let out = render_list(&catalog(), &args).unwrap();
        assert!(out.contains("tshirt-fluttercon-2025"));
        assert!(!out.contains("hoodie-fluttercon-2025"));
        assert!(out.contains("1 of 6 products (1 filters active)"));
    }

    #[test]
    fn test_list_price_bound_follows_category() {
        let args = ListArgs {
            category: Some("tshirt".to_string()),
            max_price: Some(1299),
            ..ListArgs::default()
        };
        let out = render_list(&catalog(), &args).unwrap();
        assert!(out.contains("6 of 6 products\n"));
        assert!(!out.contains("filters active"));
    }

    #[test]
    fn test_list_featured() {
        let args = ListArgs {
            featured: true,
            ..ListArgs::default()
        };
        let out = render_list(&catalog(), &args).unwrap();
        assert!(out.contains("5 of 5 products\n"));
        assert!(out.contains("hoodie-dash-mascot"));
        assert!(!out.contains("tshirt-dash-mascot"));

        let args = ListArgs {
            featured: true,
            category: Some("hoodies".to_string()),
            ..ListArgs::default()
        };
        let out = render_list(&catalog(), &args).unwrap();
        assert!(out.contains("3 of 3 products\n"));
    }

    #[test]
    fn test_list_with_no_matches_offers_facets() {
        let args = ListArgs {
            max_price: Some(100),
            ..ListArgs::default()
        };
        let out = render_list(&catalog(), &args).unwrap();
        assert!(out.contains("0 of 12 products"));
        assert!(out.contains("Available sizes: S, M, L, XL, XXL"));
    }

    #[test]
    fn test_list_rejects_unknown_category() {
        let args = ListArgs {
            category: Some("mugs".to_string()),
            ..ListArgs::default()
        };
        assert!(matches!(
            render_list(&catalog(), &args),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_product_shows_discount_and_related() {
        let out = render_product(&catalog(), "hoodie-flutter-classic").unwrap();
        assert!(out.contains("₹1,999  (was ₹2,499, 20% off)"));
        assert!(out.contains("You may also like:"));
        assert!(out.contains("hoodie-dash-mascot"));
        assert!(!out.contains("tshirt-"));
    }

    #[test]
    fn test_unknown_product() {
        assert!(matches!(
            render_product(&catalog(), "nope"),
            Err(CliError::ProductNotFound(id)) if id == "nope"
        ));
    }
}
