//! Wishlist commands.

use std::fmt::Write as _;

use flutter_store_storefront::wishlist::WishlistStore;

use super::{CliError, Context};

/// Print the wishlist.
pub fn show(ctx: &Context) {
    print_wishlist(&ctx.wishlist());
}

/// Save a catalog product.
///
/// # Errors
///
/// Returns an error if no product has this ID.
pub fn add(ctx: &Context, id: &str) -> Result<(), CliError> {
    let product = ctx
        .catalog
        .get(id)
        .ok_or_else(|| CliError::ProductNotFound(id.to_string()))?;
    let mut wishlist = ctx.wishlist();
    if !wishlist.add_to_wishlist(product) {
        tracing::info!(product_id = id, "Already in wishlist");
    }
    print_wishlist(&wishlist);
    Ok(())
}

/// Unsave a product.
pub fn remove(ctx: &Context, id: &str) {
    let mut wishlist = ctx.wishlist();
    if !wishlist.remove_from_wishlist(id) {
        tracing::warn!(product_id = id, "Not in wishlist");
    }
    print_wishlist(&wishlist);
}

fn print_wishlist(wishlist: &WishlistStore) {
    #[allow(clippy::print_stdout)]
    {
        print!("{}", render_wishlist(wishlist));
    }
}

fn render_wishlist(wishlist: &WishlistStore) -> String {
    if wishlist.total_items() == 0 {
        return "Your wishlist is empty\n".to_string();
    }

    let mut out = String::new();
    for product in wishlist.items() {
        let _ = writeln!(out, "{}  {}  {}", product.id, product.name, product.price);
    }
    let _ = writeln!(out, "{} saved", wishlist.total_items());
    out
}
