//! Catalog product records.
//!
//! Products are immutable, load-time data. Optional fields in the catalog
//! source deserialize to their defaults (`false` flags, empty image map), so
//! an absent flag never activates a filter.

use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Error returned when a string names no [`Category`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid category: {0}")]
pub struct CategoryError(pub String);

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hoodie,
    Tshirt,
}

impl Category {
    /// Singular slug used in storage and query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hoodie => "hoodie",
            Self::Tshirt => "tshirt",
        }
    }

    /// Plural heading shown on listing pages.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Hoodie => "Hoodies",
            Self::Tshirt => "T-Shirts",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryError;

    /// Accepts the singular slug, the plural listing slug, and `t-shirt(s)`,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hoodie" | "hoodies" => Ok(Self::Hoodie),
            "tshirt" | "tshirts" | "t-shirt" | "t-shirts" => Ok(Self::Tshirt),
            _ => Err(CategoryError(s.to_string())),
        }
    }
}

/// A color a product is offered in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorVariant {
    /// Display name, also used as the cart line color (e.g. "Black").
    pub name: String,
    /// CSS hex color for the swatch (e.g. "#000000").
    pub hex: String,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Pre-discount price, shown struck through when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    pub category: Category,
    pub images: Vec<String>,
    /// Images keyed by color name. Colors without an entry use `images`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub color_images: BTreeMap<String, Vec<String>>,
    pub sizes: Vec<String>,
    pub colors: Vec<ColorVariant>,
    pub in_stock: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_bestseller: bool,
    /// Sold only around the FlutterCon event.
    #[serde(default, alias = "flutterConExclusive")]
    pub event_exclusive: bool,
}

impl Product {
    /// Whether the product is offered in `size`.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Whether the product is offered in the color named `color`.
    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c.name == color)
    }

    /// Whether the product carries any promotional flag: new, bestseller or
    /// event-exclusive.
    #[must_use]
    pub const fn is_featured(&self) -> bool {
        self.is_new || self.is_bestseller || self.event_exclusive
    }

    /// Images to show for `color`, falling back to the general image list.
    #[must_use]
    pub fn images_for_color(&self, color: &str) -> &[String] {
        self.color_images
            .get(color)
            .filter(|images| !images.is_empty())
            .map_or(self.images.as_slice(), Vec::as_slice)
    }

    /// Lead image for `color`, if the product has any image at all.
    #[must_use]
    pub fn image_for_color(&self, color: &str) -> Option<&str> {
        self.images_for_color(color).first().map(String::as_str)
    }

    /// Discount against the original price, rounded to a whole percent.
    ///
    /// Returns 0 when there is no original price or it is not above the
    /// current price.
    #[must_use]
    pub fn discount_percent(&self) -> u8 {
        let Some(original) = self.original_price else {
            return 0;
        };
        let (original, price) = (original.rupees(), self.price.rupees());
        if original == 0 || original <= price {
            return 0;
        }

        // Integer round-half-up of (original - price) * 100 / original.
        let off = (original - price).saturating_mul(100);
        let percent = (off.saturating_mul(2) + original) / original.saturating_mul(2);
        u8::try_from(percent).unwrap_or(100)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product_json() -> &'static str {
        r##"{
            "id": "hoodie-flutter-classic",
            "name": "Flutter Classic Hoodie",
            "description": "Premium quality hoodie.",
            "price": 1999,
            "originalPrice": 2499,
            "category": "hoodie",
            "images": ["/images/1-h-black.png", "/images/1-h-white.jpg"],
            "colorImages": { "White": ["/images/1-h-white.jpg"] },
            "sizes": ["S", "M", "L"],
            "colors": [
                { "name": "Black", "hex": "#000000" },
                { "name": "White", "hex": "#ffffff" }
            ],
            "inStock": true,
            "isBestseller": true
        }"##
    }

    #[test]
    fn test_product_deserializes_with_defaults() {
        let product: Product = serde_json::from_str(product_json()).unwrap();
        assert_eq!(product.id, "hoodie-flutter-classic");
        assert_eq!(product.price, Price::new(1999));
        assert_eq!(product.original_price, Some(Price::new(2499)));
        assert_eq!(product.category, Category::Hoodie);
        assert!(product.is_bestseller);
        assert!(!product.is_new);
        assert!(!product.event_exclusive);
    }

    #[test]
    fn test_event_exclusive_alias() {
        let json = product_json().replace("\"isBestseller\"", "\"flutterConExclusive\"");
        let product: Product = serde_json::from_str(&json).unwrap();
        assert!(product.event_exclusive);
    }

    #[test]
    fn test_is_featured_needs_any_flag() {
        let mut product: Product = serde_json::from_str(product_json()).unwrap();
        assert!(product.is_featured());

        product.is_bestseller = false;
        assert!(!product.is_featured());

        product.is_new = true;
        assert!(product.is_featured());
    }

    #[test]
    fn test_offers_size_and_color() {
        let product: Product = serde_json::from_str(product_json()).unwrap();
        assert!(product.offers_size("M"));
        assert!(!product.offers_size("XXL"));
        assert!(product.offers_color("White"));
        assert!(!product.offers_color("white"));
    }

    #[test]
    fn test_image_for_color_falls_back() {
        let product: Product = serde_json::from_str(product_json()).unwrap();
        assert_eq!(product.image_for_color("White"), Some("/images/1-h-white.jpg"));
        assert_eq!(product.image_for_color("Black"), Some("/images/1-h-black.png"));
    }

    #[test]
    fn test_discount_percent() {
        let mut product: Product = serde_json::from_str(product_json()).unwrap();
        // (2499 - 1999) / 2499 = 20.008%
        assert_eq!(product.discount_percent(), 20);

        product.price = Price::new(799);
        product.original_price = Some(Price::new(999));
        // 200 / 999 = 20.02%
        assert_eq!(product.discount_percent(), 20);

        product.original_price = Some(Price::new(1598));
        // 799 / 1598 = 50% exactly
        assert_eq!(product.discount_percent(), 50);

        product.original_price = None;
        assert_eq!(product.discount_percent(), 0);
    }

    #[test]
    fn test_category_from_str_aliases() {
        assert_eq!("hoodies".parse::<Category>().unwrap(), Category::Hoodie);
        assert_eq!("TShirt".parse::<Category>().unwrap(), Category::Tshirt);
        assert_eq!("t-shirts".parse::<Category>().unwrap(), Category::Tshirt);
        let err = "mugs".parse::<Category>().unwrap_err();
        assert_eq!(err, CategoryError("mugs".to_string()));
        assert_eq!(err.to_string(), "invalid category: mugs");
    }
}
