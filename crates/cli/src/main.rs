//! Flutter Store CLI - browse the catalog and manage the local cart and
//! wishlist without running the server.
//!
//! # Usage
//!
//! ```bash
//! # Browse hoodies in size M under ₹2,000
//! fs-cli products --category hoodies --size M --max-price 2000
//!
//! # Featured products
//! fs-cli products --featured
//!
//! # Show one product
//! fs-cli product hoodie-dash-mascot
//!
//! # Cart
//! fs-cli cart add hoodie-dash-mascot --size M --color Black --quantity 2
//! fs-cli cart update hoodie-dash-mascot --size M --color Black --quantity 1
//! fs-cli cart show
//!
//! # Wishlist
//! fs-cli wishlist add tshirt-fluttercon-2025
//!
//! # Checkout (prints the WhatsApp link)
//! fs-cli checkout --name Asha --phone 9876543210 --address "12 Anna Salai" \
//!     --city Chennai --pincode 600001
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATA_DIR` - Cart/wishlist directory shared with the server (default: .flutter-store)
//! - `STOREFRONT_CATALOG_PATH` - Catalog JSON override (default: bundled catalog)
//! - `STOREFRONT_WHATSAPP_NUMBER` - Required for `checkout`

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "fs-cli")]
#[command(author, version, about = "Flutter Store command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, optionally filtered
    Products(commands::catalog::ListArgs),
    /// Show one product with related products
    Product {
        /// Product ID
        id: String,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Validate delivery details and print the WhatsApp order link
    Checkout(commands::checkout::CheckoutArgs),
}

/// A cart line, identified by product, size and color.
#[derive(Args)]
struct LineArgs {
    /// Product ID
    id: String,

    /// Size, e.g. M
    #[arg(short, long)]
    size: String,

    /// Color name, e.g. Black
    #[arg(short, long)]
    color: String,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show lines and totals
    Show,
    /// Add a product in a size and color
    Add {
        #[command(flatten)]
        line: LineArgs,

        /// How many to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity (0 removes it)
    Update {
        #[command(flatten)]
        line: LineArgs,

        /// New quantity
        #[arg(short, long, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        #[command(flatten)]
        line: LineArgs,
    },
    /// Remove every line
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show saved products
    Show,
    /// Save a product
    Add {
        /// Product ID
        id: String,
    },
    /// Unsave a product
    Remove {
        /// Product ID
        id: String,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::from_env()?;

    match cli.command {
        Commands::Products(args) => commands::catalog::list(&ctx, &args)?,
        Commands::Product { id } => commands::catalog::show(&ctx, &id)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Add { line, quantity } => {
                commands::cart::add(&ctx, &line.id, &line.size, &line.color, quantity)?;
            }
            CartAction::Update { line, quantity } => {
                commands::cart::update(&ctx, &line.id, &line.size, &line.color, quantity);
            }
            CartAction::Remove { line } => {
                commands::cart::remove(&ctx, &line.id, &line.size, &line.color);
            }
            CartAction::Clear => commands::cart::clear(&ctx),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&ctx),
            WishlistAction::Add { id } => commands::wishlist::add(&ctx, &id)?,
            WishlistAction::Remove { id } => commands::wishlist::remove(&ctx, &id),
        },
        Commands::Checkout(args) => commands::checkout::run(&ctx, args)?,
    }
    Ok(())
}
