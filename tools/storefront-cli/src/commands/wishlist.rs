//! Wishlist commands.

use anyhow::{bail, Context as _, Result};
use storefront_cache::FileStore;
use storefront_commerce::catalog::Product;
use storefront_commerce::store::WishlistStore;
use storefront_commerce::ProductId;

use super::{WishlistArgs, WishlistCommand};
use crate::context::Context;

/// Run the wishlist command.
pub async fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    let mut wishlist = ctx.wishlist()?;

    match args.command.unwrap_or(WishlistCommand::Show) {
        WishlistCommand::Show => {}
        WishlistCommand::Add { id } => {
            let product = fetch(id, ctx).await?;
            let change = wishlist.add(&product);
            ctx.output.save_status("Wishlist", &change.save);
            if change.outcome {
                ctx.output.success(&format!("Saved {} to the wishlist", product.title));
            } else {
                ctx.output.info(&format!("{} is already in the wishlist", product.title));
            }
        }
        WishlistCommand::Remove { id } => {
            let change = wishlist.remove(id);
            ctx.output.save_status("Wishlist", &change.save);
            if change.outcome {
                ctx.output.success(&format!("Removed product {} from the wishlist", id));
            } else {
                ctx.output.warn(&format!("Product {} is not in the wishlist", id));
            }
        }
        WishlistCommand::Toggle { id } => {
            let product = match wishlist.state().items().iter().find(|p| p.id == id) {
                Some(saved) => saved.clone(),
                None => fetch(id, ctx).await?,
            };
            let change = wishlist.toggle(&product);
            ctx.output.save_status("Wishlist", &change.save);
            if change.outcome {
                ctx.output.success(&format!("Saved {} to the wishlist", product.title));
            } else {
                ctx.output.success(&format!("Removed {} from the wishlist", product.title));
            }
        }
        WishlistCommand::Clear => {
            let change = wishlist.clear();
            ctx.output.save_status("Wishlist", &change.save);
            ctx.output.success("Wishlist cleared");
        }
    }

    show(&wishlist, ctx);
    Ok(())
}

async fn fetch(id: ProductId, ctx: &Context) -> Result<Product> {
    let catalog = ctx.catalog()?;
    let spinner = ctx.output.spinner("Fetching product...");
    let result = catalog.product(id).await;
    spinner.finish_and_clear();

    match result.with_context(|| format!("Could not load product {}", id))? {
        Some(product) => Ok(product),
        None => bail!("Product {} not found", id),
    }
}

fn show(wishlist: &WishlistStore<FileStore>, ctx: &Context) {
    let state = wishlist.state();

    if ctx.output.is_json() {
        ctx.output.json(state);
        return;
    }

    ctx.output.header(&format!("Wishlist ({})", state.total_items()));
    if state.is_empty() {
        ctx.output.info("Your wishlist is empty");
        return;
    }
    ctx.output.products(state.items());
}
