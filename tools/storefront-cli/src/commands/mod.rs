//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod wishlist;

use clap::{Args, Subcommand};
use storefront_commerce::ProductId;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only show this category ("all" shows every category).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Sort order: price-asc, price-desc or rating.
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Lowest price, inclusive.
    #[arg(long)]
    pub min_price: Option<String>,

    /// Highest price, inclusive.
    #[arg(long)]
    pub max_price: Option<String>,

    /// Start from a listing query string or URL, e.g. "?category=jewelery&sort=rating".
    #[arg(short, long)]
    pub query: Option<String>,
}

/// Arguments for the featured command.
#[derive(Args)]
pub struct FeaturedArgs {
    /// Number of products to show.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: ProductId,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add one unit of a product.
    Add {
        /// Product ID.
        id: ProductId,
    },
    /// Remove a product's line.
    Remove {
        /// Product ID.
        id: ProductId,
    },
    /// Set a line's quantity; 0 removes it.
    Set {
        /// Product ID.
        id: ProductId,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Increase a line's quantity by one.
    Inc {
        /// Product ID.
        id: ProductId,
    },
    /// Decrease a line's quantity by one.
    Dec {
        /// Product ID.
        id: ProductId,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: Option<WishlistCommand>,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// Show the wishlist.
    Show,
    /// Add a product.
    Add {
        /// Product ID.
        id: ProductId,
    },
    /// Remove a product.
    Remove {
        /// Product ID.
        id: ProductId,
    },
    /// Add the product if absent, remove it if present.
    Toggle {
        /// Product ID.
        id: ProductId,
    },
    /// Remove every product.
    Clear,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
