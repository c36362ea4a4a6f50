//! Newtype IDs for type-safe entity references.
//!
//! Catalog products are identified by stable string slugs such as
//! `hoodie-flutter-classic`. Wrapping them keeps product IDs from being mixed
//! up with the other free-text fields that travel alongside them (sizes,
//! colors, names).

use core::fmt;
use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog product.
///
/// Serializes transparently as the underlying string.
///
/// # Example
///
/// ```rust
/// # use flutter_store_core::ProductId;
/// let id = ProductId::new("tshirt-dash-mascot");
/// assert_eq!(id.as_str(), "tshirt-dash-mascot");
/// assert_eq!(id, "tshirt-dash-mascot");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ProductId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProductId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
