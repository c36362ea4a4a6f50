//! Local durable storage for cart and wishlist state.
//!
//! Storage is a small key/value capability modelled on browser local storage:
//! string values under string keys, read once when a store is built and
//! rewritten wholesale after every mutation.
//!
//! # Backends
//!
//! - [`FileStorage`] - one `<key>.json` file per key inside a data directory
//! - [`MemoryStorage`] - process-local map, with switchable failures for tests
//!
//! # Keys
//!
//! | Key                        | Value                                  |
//! |----------------------------|----------------------------------------|
//! | `flutter-store-cart`       | JSON array of cart line items          |
//! | `flutter-store-wishlist`   | JSON array of product snapshots        |
//! | `flutter-store-health`     | Readiness sentinel (`ok`)              |

mod file;
mod memory;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage keys used by the stores.
pub mod keys {
    /// Key for the cart line items.
    pub const CART: &str = "flutter-store-cart";

    /// Key for the wishlist product snapshots.
    pub const WISHLIST: &str = "flutter-store-wishlist";

    /// Sentinel key written by readiness checks.
    pub const HEALTH: &str = "flutter-store-health";
}

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored value could not be decoded.
    #[error("corrupted value for key {key}: {source}")]
    Corrupted {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The collection could not be encoded.
    #[error("failed to encode value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The key contains characters the backend cannot store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// The backend refused the operation (quota, lock poisoning, etc.).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Key/value local storage.
///
/// Implementations must be safe to share between threads; the stores hold
/// them behind an `Arc`.
pub trait LocalStorage: Send + Sync {
    /// Read the value stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Verify the medium accepts a write and a read right now.
    ///
    /// The default round-trips a sentinel value under [`keys::HEALTH`].
    ///
    /// # Errors
    ///
    /// Returns the backend error from the failing operation.
    fn health_check(&self) -> Result<(), StorageError> {
        self.set_item(keys::HEALTH, "ok")?;
        self.get_item(keys::HEALTH).map(|_| ())
    }
}

/// A typed JSON array persisted under a single storage key.
///
/// This is the persistence capability injected into each store: `load`
/// never fails (it falls back to an empty collection), `save` reports errors
/// and leaves it to the caller whether to care.
pub struct JsonCollection<T> {
    storage: Arc<dyn LocalStorage>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonCollection<T> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            key: self.key,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for JsonCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonCollection")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Bind a collection to `key` in `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn LocalStorage>, key: &'static str) -> Self {
        Self {
            storage,
            key,
            _marker: PhantomData,
        }
    }

    /// The storage key this collection lives under.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Read and decode the collection. A missing key is an empty collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored value is not a
    /// valid JSON array of `T`.
    pub fn try_load(&self) -> Result<Vec<T>, StorageError> {
        let Some(raw) = self.storage.get_item(self.key)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupted {
            key: self.key.to_string(),
            source,
        })
    }

    /// Read the collection, falling back to empty on any error.
    pub fn load(&self) -> Vec<T> {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!(key = self.key, error = %e, "Discarding unreadable stored collection");
            Vec::new()
        })
    }

    /// Encode and write the whole collection.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    pub fn save(&self, items: &[T]) -> Result<(), StorageError> {
        let json = serde_json::to_string(items).map_err(|source| StorageError::Encode {
            key: self.key.to_string(),
            source,
        })?;
        self.storage.set_item(self.key, &json)
    }
}
