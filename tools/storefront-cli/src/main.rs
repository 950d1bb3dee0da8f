//! Storefront CLI - browse the catalog and manage a local cart and wishlist.
//!
//! Commands:
//! - `storefront products` - List products with filters and sorting
//! - `storefront featured` - Show the landing-page selection
//! - `storefront categories` - List categories
//! - `storefront product <id>` - Show one product
//! - `storefront cart` - Show and change the cart
//! - `storefront wishlist` - Show and change the wishlist
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{CartArgs, ConfigArgs, FeaturedArgs, ProductArgs, ProductsArgs, WishlistArgs};

/// Storefront CLI - browse products, manage your cart and wishlist
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, optionally filtered and sorted
    Products(ProductsArgs),

    /// Show featured products
    Featured(FeaturedArgs),

    /// List product categories
    Categories,

    /// Show a single product
    Product(ProductArgs),

    /// Show or change the cart
    Cart(CartArgs),

    /// Show or change the wishlist
    Wishlist(WishlistArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::catalog::products(args, &ctx).await,
        Commands::Featured(args) => commands::catalog::featured(args, &ctx).await,
        Commands::Categories => commands::catalog::categories(&ctx).await,
        Commands::Product(args) => commands::catalog::product(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Wishlist(args) => commands::wishlist::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
