//! Checkout hand-off.
//!
//! Checkout does not place orders. It validates the delivery details, formats
//! the cart and customer into a single message, and produces a WhatsApp deep
//! link that opens a chat with the store pre-filled with that message. What
//! happens after the link is opened is unknown to the store, so the cart is
//! left untouched.

use std::fmt::{self, Write as _};

use flutter_store_core::{Phone, PhoneError, Pincode, PincodeError, Price};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{CartLineItem, CartStore};

/// Base of the WhatsApp click-to-chat link.
const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Divider line used between message sections.
const DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━";

/// Why a checkout was refused. The `Display` text is shown to the shopper.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("Please enter your name")]
    MissingName,
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone(#[source] PhoneError),
    #[error("Please enter your delivery address")]
    MissingAddress,
    #[error("Please enter your city")]
    MissingCity,
    #[error("Please enter a valid 6-digit pincode")]
    InvalidPincode(#[source] PincodeError),
}

impl CheckoutError {
    /// Form field the error refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::EmptyCart => None,
            Self::MissingName => Some("name"),
            Self::InvalidPhone(_) => Some("phone"),
            Self::MissingAddress => Some("address"),
            Self::MissingCity => Some("city"),
            Self::InvalidPincode(_) => Some("pincode"),
        }
    }
}

/// Raw checkout form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub pincode: String,
}

/// Validated delivery details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: Phone,
    pub address: String,
    pub city: String,
    pub pincode: Pincode,
}

impl CheckoutForm {
    /// Validate the fields in form order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the `CheckoutError` for the first invalid field.
    pub fn validate(&self) -> Result<CustomerDetails, CheckoutError> {
        let name = required(&self.name).ok_or(CheckoutError::MissingName)?;
        let phone = Phone::parse(&self.phone).map_err(CheckoutError::InvalidPhone)?;
        let address = required(&self.address).ok_or(CheckoutError::MissingAddress)?;
        let city = required(&self.city).ok_or(CheckoutError::MissingCity)?;
        let pincode = Pincode::parse(&self.pincode).map_err(CheckoutError::InvalidPincode)?;

        Ok(CustomerDetails {
            name,
            phone,
            address,
            city,
            pincode,
        })
    }
}

fn required(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Errors that can occur when parsing a [`WhatsAppNumber`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WhatsAppNumberError {
    #[error("WhatsApp number must contain digits only (country code first, no '+')")]
    NonDigit,
    #[error("WhatsApp number must be {min}-{max} digits including country code")]
    WrongLength { min: usize, max: usize },
}

/// The store's WhatsApp number in international form without `+`,
/// e.g. `919876543210`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppNumber(String);

impl WhatsAppNumber {
    const MIN_DIGITS: usize = 8;
    const MAX_DIGITS: usize = 15;

    /// Parse a number. Spaces and dashes are stripped first.
    ///
    /// # Errors
    ///
    /// Returns an error if anything but digits remain or the digit count is
    /// outside 8-15.
    pub fn parse(s: &str) -> Result<Self, WhatsAppNumberError> {
        let digits: String = s.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(WhatsAppNumberError::NonDigit);
        }
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(WhatsAppNumberError::WrongLength {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }
        Ok(Self(digits))
    }

    /// The digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WhatsAppNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the shopper needs to finish the order in WhatsApp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutHandoff {
    /// The composed order message.
    pub message: String,
    /// `https://wa.me/<number>?text=<message>`.
    pub url: String,
    pub total_items: u64,
    pub total_price: Price,
}

/// Validate `form` against a non-empty `cart` and build the hand-off.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` for an empty cart, otherwise the first
/// field validation error.
pub fn prepare(
    form: &CheckoutForm,
    cart: &CartStore,
    number: &WhatsAppNumber,
) -> Result<CheckoutHandoff, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let customer = form.validate()?;
    let message = order_message(&customer, cart.items());
    let url = whatsapp_link(number, &message);

    tracing::info!(
        total_items = cart.total_items(),
        total_price = cart.total_price().rupees(),
        "Checkout hand-off prepared"
    );

    Ok(CheckoutHandoff {
        message,
        url,
        total_items: cart.total_items(),
        total_price: cart.total_price(),
    })
}

/// Compose the order message for `lines`.
#[must_use]
pub fn order_message(customer: &CustomerDetails, lines: &[CartLineItem]) -> String {
    let total_items: u64 = lines.iter().map(|l| u64::from(l.quantity)).sum();
    let total_price: Price = lines.iter().map(CartLineItem::subtotal).sum();

    let mut message = String::new();
    // Writing into a String cannot fail.
    let _ = write_order_message(&mut message, customer, lines, total_items, total_price);
    message
}

fn write_order_message(
    out: &mut String,
    customer: &CustomerDetails,
    lines: &[CartLineItem],
    total_items: u64,
    total_price: Price,
) -> fmt::Result {
    writeln!(out, "🛍️ *NEW ORDER - FLUTTER STORE*")?;
    writeln!(out)?;

    writeln!(out, "👤 *CUSTOMER DETAILS*")?;
    writeln!(out, "{DIVIDER}")?;
    writeln!(out, "Name: {}", customer.name)?;
    writeln!(out, "Phone: {}", customer.phone)?;
    writeln!(out, "Address: {}", customer.address)?;
    writeln!(out, "City: {}", customer.city)?;
    writeln!(out, "Pincode: {}", customer.pincode)?;
    writeln!(out)?;

    writeln!(out, "📦 *ORDER DETAILS*")?;
    writeln!(out, "{DIVIDER}")?;
    for (index, line) in lines.iter().enumerate() {
        writeln!(out, "{}. *{}*", index + 1, line.name)?;
        writeln!(out, "   Size: {} | Color: {}", line.size, line.color)?;
        writeln!(out, "   Qty: {} × {}", line.quantity, line.price)?;
        writeln!(out, "   Subtotal: {}", line.subtotal())?;
        writeln!(out)?;
    }

    writeln!(out, "💰 *ORDER SUMMARY*")?;
    writeln!(out, "{DIVIDER}")?;
    writeln!(out, "Total Items: {total_items}")?;
    writeln!(out, "*TOTAL AMOUNT: {total_price}*")?;
    writeln!(out)?;

    writeln!(out, "✨ _Thank you for shopping with Namma Flutter Chennai!_")?;
    write!(out, "#FlutterStore #NammaFlutter")
}

/// Build the click-to-chat link carrying `message`.
///
/// Every byte outside `A-Z a-z 0-9 - _ . ~` is percent-encoded, so spaces
/// become `%20` rather than `+` and `!` becomes `%21`.
#[must_use]
pub fn whatsapp_link(number: &WhatsAppNumber, message: &str) -> String {
    format!(
        "{WHATSAPP_BASE_URL}{}?text={}",
        number.as_str(),
        urlencoding::encode(message)
    )
}
