//! Cart commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use storefront_cache::FileStore;
use storefront_commerce::cart::{AddOutcome, StepOutcome, MAX_QUANTITY_PER_LINE};
use storefront_commerce::store::CartStore;
use storefront_commerce::ProductId;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::format_timestamp;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { id } => add(&mut cart, id, ctx).await?,
        CartCommand::Remove { id } => {
            let change = cart.remove_item(id);
            ctx.output.save_status("Cart", &change.save);
            if change.outcome {
                ctx.output.success(&format!("Removed product {} from the cart", id));
            } else {
                ctx.output.warn(&format!("Product {} is not in the cart", id));
            }
        }
        CartCommand::Set { id, quantity } => {
            let change = cart.set_quantity(id, quantity);
            ctx.output.save_status("Cart", &change.save);
            match set_message(id, quantity, change.outcome) {
                Ok(message) => ctx.output.success(&message),
                Err(warning) => ctx.output.warn(&warning),
            }
        }
        CartCommand::Inc { id } => {
            let change = cart.increment(id);
            ctx.output.save_status("Cart", &change.save);
            report_step(change.outcome, id, &cart, ctx);
        }
        CartCommand::Dec { id } => {
            let change = cart.decrement(id);
            ctx.output.save_status("Cart", &change.save);
            report_step(change.outcome, id, &cart, ctx);
        }
        CartCommand::Clear { yes } => {
            if cart.state().is_empty() {
                ctx.output.info("Cart is already empty");
                return Ok(());
            }
            if !yes {
                if ctx.output.is_json() {
                    bail!("Refusing to clear the cart without --yes in JSON mode");
                }
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove all {} items from the cart?", cart.state().total_items()))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    ctx.output.info("Cancelled");
                    return Ok(());
                }
            }
            let change = cart.clear();
            ctx.output.save_status("Cart", &change.save);
            ctx.output.success("Cart cleared");
        }
    }

    show(&cart, ctx);
    Ok(())
}

async fn add(cart: &mut CartStore<FileStore>, id: ProductId, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let spinner = ctx.output.spinner("Fetching product...");
    let result = catalog.product(id).await;
    spinner.finish_and_clear();

    let product = match result.with_context(|| format!("Could not load product {}", id))? {
        Some(product) => product,
        None => bail!("Product {} not found", id),
    };

    let change = cart.add_item(&product);
    ctx.output.save_status("Cart", &change.save);
    match change.outcome {
        AddOutcome::Added => ctx.output.success(&format!("Added {} to the cart", product.title)),
        AddOutcome::Incremented => ctx.output.success(&format!("Added another {}", product.title)),
        AddOutcome::AtLimit => ctx.output.warn(&format!(
            "{} is already at the limit of {} per order",
            product.title, MAX_QUANTITY_PER_LINE
        )),
    }
    Ok(())
}

/// What `cart set` reports; `Err` carries a warning for an id not in the cart.
fn set_message(id: ProductId, quantity: i64, touched: bool) -> Result<String, String> {
    if !touched {
        return Err(format!("Product {} is not in the cart", id));
    }
    if quantity <= 0 {
        Ok(format!("Removed product {} from the cart", id))
    } else {
        Ok(format!("Set product {} to {}", id, quantity))
    }
}

fn report_step(outcome: StepOutcome, id: ProductId, cart: &CartStore<FileStore>, ctx: &Context) {
    match outcome {
        StepOutcome::Changed => {
            let quantity = cart.state().line(id).map(|line| line.quantity).unwrap_or(0);
            ctx.output.success(&format!("Product {} quantity is now {}", id, quantity));
        }
        StepOutcome::AtBound => ctx.output.warn(&format!(
            "Product {} is at its limit (1 to {}); use `cart remove` to drop it",
            id, MAX_QUANTITY_PER_LINE
        )),
        StepOutcome::Missing => ctx.output.warn(&format!("Product {} is not in the cart", id)),
    }
}

fn show(cart: &CartStore<FileStore>, ctx: &Context) {
    let state = cart.state();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "cart": state,
            "saved_at": cart.saved_at(),
        }));
        return;
    }

    ctx.output.header("Cart");
    if state.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    ctx.output.cart_lines(state.lines());
    ctx.output.info("");
    ctx.output.kv("items", &state.total_items().to_string());
    ctx.output.kv("total", &state.total_amount().display());
    if let Some(saved_at) = cart.saved_at() {
        ctx.output.kv("saved", &format_timestamp(saved_at));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_cache::MemoryStore;

    #[test]
    fn test_set_unknown_id_is_a_warning() {
        let mut cart = CartStore::open(MemoryStore::new()).unwrap();
        let id = ProductId::new(42);
        let change = cart.set_quantity(id, 3);
        assert!(!change.outcome);
        assert!(cart.state().is_empty());
        assert_eq!(
            set_message(id, 3, change.outcome),
            Err("Product 42 is not in the cart".to_string())
        );
    }

    #[test]
    fn test_set_messages() {
        let id = ProductId::new(1);
        assert_eq!(set_message(id, 4, true), Ok("Set product 1 to 4".to_string()));
        assert_eq!(set_message(id, 0, true), Ok("Removed product 1 from the cart".to_string()));
    }
}
