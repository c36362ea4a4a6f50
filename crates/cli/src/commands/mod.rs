//! Command implementations.
//!
//! Commands work on the same data directory as the server, so a cart built
//! here shows up in the storefront and vice versa. The server keeps its own
//! copy in memory, though; the last writer wins.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod wishlist;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flutter_store_storefront::cart::CartStore;
use flutter_store_storefront::catalog::{Catalog, CatalogError};
use flutter_store_storefront::checkout::WhatsAppNumberError;
use flutter_store_storefront::storage::{FileStorage, LocalStorage, StorageError};
use flutter_store_storefront::wishlist::WishlistStore;
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".flutter-store";

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// The WhatsApp number is malformed.
    #[error("Invalid STOREFRONT_WHATSAPP_NUMBER: {0}")]
    WhatsAppNumber(#[from] WhatsAppNumberError),

    /// The catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The data directory could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No product has this ID.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// An argument was rejected; the message is shown as-is.
    #[error("{0}")]
    InvalidArgument(String),
}

/// Everything a command needs: the catalog and local storage.
pub struct Context {
    pub catalog: Catalog,
    pub storage: Arc<dyn LocalStorage>,
}

impl Context {
    /// Load the catalog and open the data directory named by the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or the data
    /// directory cannot be created.
    pub fn from_env() -> Result<Self, CliError> {
        dotenvy::dotenv().ok();

        let catalog = match env_path(std::env::var_os("STOREFRONT_CATALOG_PATH")) {
            Some(path) => Catalog::from_path(&path)?,
            None => Catalog::bundled()?,
        };
        let data_dir = env_path(std::env::var_os("STOREFRONT_DATA_DIR"))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Self::open(catalog, &data_dir)
    }

    /// Use `catalog` with file storage in `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open(catalog: Catalog, data_dir: &Path) -> Result<Self, CliError> {
        tracing::debug!(data_dir = %data_dir.display(), "Opening local storage");
        Ok(Self {
            catalog,
            storage: Arc::new(FileStorage::open(data_dir)?),
        })
    }

    /// The cart as currently stored.
    #[must_use]
    pub fn cart(&self) -> CartStore {
        CartStore::with_storage(Arc::clone(&self.storage))
    }

    /// The wishlist as currently stored.
    #[must_use]
    pub fn wishlist(&self) -> WishlistStore {
        WishlistStore::with_storage(Arc::clone(&self.storage))
    }
}

/// A path-valued variable, with an empty value meaning unset.
fn env_path(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}
