//! Checkout command.
//!
//! Prints the order message and the WhatsApp link that opens it. The cart is
//! kept, as on the storefront.

use clap::Args;
use flutter_store_storefront::checkout::{self, CheckoutForm, CheckoutHandoff, WhatsAppNumber};

use super::{CliError, Context};

/// Delivery details.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// 10-digit phone number
    #[arg(long)]
    pub phone: String,

    /// Delivery address
    #[arg(long)]
    pub address: String,

    /// City
    #[arg(long)]
    pub city: String,

    /// 6-digit pincode
    #[arg(long)]
    pub pincode: String,
}

impl From<CheckoutArgs> for CheckoutForm {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            name: args.name,
            phone: args.phone,
            address: args.address,
            city: args.city,
            pincode: args.pincode,
        }
    }
}

/// Validate the details against the stored cart and print the hand-off.
///
/// # Errors
///
/// Returns an error if `STOREFRONT_WHATSAPP_NUMBER` is missing or invalid,
/// the cart is empty, or a field fails validation.
pub fn run(ctx: &Context, args: CheckoutArgs) -> Result<(), CliError> {
    let number = std::env::var("STOREFRONT_WHATSAPP_NUMBER")
        .map_err(|_| CliError::MissingEnvVar("STOREFRONT_WHATSAPP_NUMBER"))?;
    let number = WhatsAppNumber::parse(&number)?;

    let handoff = prepare(ctx, args, &number)?;
    #[allow(clippy::print_stdout)]
    {
        println!("{}\n", handoff.message);
        println!("Open this link to send the order:\n{}", handoff.url);
    }
    Ok(())
}

fn prepare(
    ctx: &Context,
    args: CheckoutArgs,
    number: &WhatsAppNumber,
) -> Result<CheckoutHandoff, CliError> {
    let form = CheckoutForm::from(args);
    checkout::prepare(&form, &ctx.cart(), number)
        .map_err(|e| CliError::InvalidArgument(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use flutter_store_storefront::cart::NewLineItem;

    use super::*;
    use crate::commands::tests::context;

    fn args() -> CheckoutArgs {
        CheckoutArgs {
            name: "Asha".to_string(),
            phone: "9876543210".to_string(),
            address: "12 Anna Salai".to_string(),
            city: "Chennai".to_string(),
            pincode: "600001".to_string(),
        }
    }

    fn number() -> WhatsAppNumber {
        WhatsAppNumber::parse("919876543210").unwrap()
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let err = prepare(&context(), args(), &number()).unwrap_err();
        assert_eq!(err.to_string(), "Your cart is empty");
    }

    #[test]
    fn test_handoff_keeps_cart() {
        let ctx = context();
        let product = ctx.catalog.get("hoodie-namma-flutter").unwrap();
        ctx.cart()
            .add_item(NewLineItem::select(product, Some("XL"), Some("Black")).unwrap());

        let handoff = prepare(&ctx, args(), &number()).unwrap();
        assert!(handoff.message.contains("*Namma Flutter Chennai Hoodie*"));
        assert!(handoff.url.starts_with("https://wa.me/919876543210?text="));
        assert_eq!(ctx.cart().total_items(), 1);
    }

    #[test]
    fn test_invalid_field_message() {
        let ctx = context();
        let product = ctx.catalog.get("hoodie-namma-flutter").unwrap();
        ctx.cart()
            .add_item(NewLineItem::select(product, Some("XL"), Some("Black")).unwrap());

        let mut bad = args();
        bad.pincode = "60001".to_string();
        let err = prepare(&ctx, bad, &number()).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid 6-digit pincode");
    }
}
