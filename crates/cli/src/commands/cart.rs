//! Cart commands.

use std::fmt::Write as _;

use flutter_store_storefront::cart::{CartStore, NewLineItem};

use super::{CliError, Context};

/// Print the cart.
pub fn show(ctx: &Context) {
    print_cart(&ctx.cart());
}

/// Add a product in a size and color.
///
/// # Errors
///
/// Returns an error for an unknown product, a size or color the product
/// does not come in, or a zero quantity.
pub fn add(
    ctx: &Context,
    id: &str,
    size: &str,
    color: &str,
    quantity: u32,
) -> Result<(), CliError> {
    let mut cart = ctx.cart();
    add_to(ctx, &mut cart, id, size, color, quantity)?;
    print_cart(&cart);
    Ok(())
}

/// Set a line's quantity; zero or less removes it.
pub fn update(ctx: &Context, id: &str, size: &str, color: &str, quantity: i64) {
    let mut cart = ctx.cart();
    if !cart.update_quantity(id, size, color, quantity) {
        tracing::warn!(product_id = id, size, color, "No such line in cart");
    }
    print_cart(&cart);
}

/// Remove a line.
pub fn remove(ctx: &Context, id: &str, size: &str, color: &str) {
    let mut cart = ctx.cart();
    if !cart.remove_item(id, size, color) {
        tracing::warn!(product_id = id, size, color, "No such line in cart");
    }
    print_cart(&cart);
}

/// Empty the cart.
pub fn clear(ctx: &Context) {
    let mut cart = ctx.cart();
    cart.clear();
    print_cart(&cart);
}

fn add_to(
    ctx: &Context,
    cart: &mut CartStore,
    id: &str,
    size: &str,
    color: &str,
    quantity: u32,
) -> Result<(), CliError> {
    let product = ctx
        .catalog
        .get(id)
        .ok_or_else(|| CliError::ProductNotFound(id.to_string()))?;
    if quantity == 0 {
        return Err(CliError::InvalidArgument(
            "Quantity must be at least 1".to_string(),
        ));
    }
    let item = NewLineItem::select(product, Some(size), Some(color))
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?
        .with_quantity(quantity);

    tracing::info!(product_id = id, size, color, quantity, "Adding to cart");
    cart.add_item(item);
    Ok(())
}

fn print_cart(cart: &CartStore) {
    #[allow(clippy::print_stdout)]
    {
        print!("{}", render_cart(cart));
    }
}

fn render_cart(cart: &CartStore) -> String {
    if cart.is_empty() {
        return "Your cart is empty\n".to_string();
    }

    let mut out = String::new();
    for line in cart.items() {
        let _ = writeln!(
            out,
            "{} ({}, {})  {} × {} = {}",
            line.name,
            line.size,
            line.color,
            line.quantity,
            line.price,
            line.subtotal()
        );
    }
    let _ = writeln!(
        out,
        "{} items, total {}",
        cart.total_items(),
        cart.total_price()
    );
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::tests::context;

    #[test]
    fn test_add_then_render() {
        let ctx = context();
        let mut cart = ctx.cart();
        add_to(&ctx, &mut cart, "tshirt-flutter-classic", "M", "Black", 2).unwrap();
        add_to(&ctx, &mut cart, "tshirt-flutter-classic", "M", "Black", 1).unwrap();

        let out = render_cart(&cart);
        assert!(out.contains("Flutter Classic Tee (M, Black)  3 × ₹799 = ₹2,397"));
        assert!(out.contains("3 items, total ₹2,397"));
    }

    #[test]
    fn test_add_persists_across_contexts_sharing_storage() {
        let ctx = context();
        let mut cart = ctx.cart();
        add_to(&ctx, &mut cart, "hoodie-widget-tree", "L", "White", 1).unwrap();

        assert_eq!(ctx.cart().total_items(), 1);
    }

    #[test]
    fn test_add_rejects_bad_choices() {
        let ctx = context();
        let mut cart = ctx.cart();

        let err = add_to(&ctx, &mut cart, "hoodie-widget-tree", "S", "Black", 1).unwrap_err();
        assert_eq!(err.to_string(), "Please select a size");

        let err = add_to(&ctx, &mut cart, "hoodie-widget-tree", "M", "Green", 1).unwrap_err();
        assert_eq!(err.to_string(), "Please select a color");

        assert!(matches!(
            add_to(&ctx, &mut cart, "nope", "M", "Black", 1),
            Err(CliError::ProductNotFound(_))
        ));
        assert!(matches!(
            add_to(&ctx, &mut cart, "hoodie-widget-tree", "M", "Black", 0),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_cart(&context().cart()), "Your cart is empty\n");
    }
}
