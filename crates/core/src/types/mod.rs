//! Core types for the Flutter Store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod id;
pub mod price;
pub mod product;

pub use contact::{Phone, PhoneError, Pincode, PincodeError};
pub use id::ProductId;
pub use price::Price;
pub use product::{Category, CategoryError, ColorVariant, Product};
