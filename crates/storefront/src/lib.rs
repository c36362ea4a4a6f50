//! Flutter Store storefront library.
//!
//! Catalog browsing and filtering, a persistent cart and wishlist, and the
//! WhatsApp checkout hand-off, exposed as a JSON API by the
//! `flutter-store-storefront` binary and driven directly by `fs-cli`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;
pub mod wishlist;
