//! Flutter Store Core - Shared types library.
//!
//! This crate provides the domain types used across all Flutter Store components:
//! - `storefront` - Catalog, cart, wishlist and checkout logic plus the HTTP API
//! - `cli` - Command-line client over the same local storage
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product records, type-safe IDs, prices and checkout contact fields

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
