//! Catalog browsing commands.

use anyhow::{bail, Context as _, Result};
use storefront_commerce::money::{Currency, Money};
use storefront_commerce::routes::{listing_path, product_path};
use storefront_commerce::search::{FilterCriteria, SortKey, ViewState};

use super::{FeaturedArgs, ProductArgs, ProductsArgs};
use crate::context::Context;

/// List products, filtered and sorted.
pub async fn products(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    let spinner = ctx.output.spinner("Fetching products...");
    let (products, categories) = futures::join!(catalog.all_products(), catalog.categories());
    spinner.finish_and_clear();

    let products = products.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "product list unavailable");
        ctx.output.error(&format!("Could not load products: {}", e));
        Vec::new()
    });
    let categories = categories.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "category list unavailable");
        Vec::new()
    });

    let mut view = ViewState::new(products, args.query.as_deref().unwrap_or_default());
    apply_overrides(&mut view, &args)?;
    let visible = view.visible();

    let link = listing_path(ctx.config.display.locale, view.criteria());
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "criteria": view.criteria(),
            "link": link,
            "categories": categories,
            "products": visible,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Products ({} of {})", visible.len(), view.products().len()));
    describe_criteria(view.criteria(), ctx);
    ctx.output.products(&visible);

    if !categories.is_empty() {
        ctx.output.info("");
        ctx.output.kv("categories", &categories.join(", "));
    }
    ctx.output.kv("link", &link);

    Ok(())
}

/// Flags override whatever `--query` seeded.
fn apply_overrides(view: &mut ViewState, args: &ProductsArgs) -> Result<()> {
    if let Some(category) = &args.category {
        let _ = view.set_category(category.as_str());
    }
    if let Some(sort) = &args.sort {
        let key = SortKey::from_param(sort);
        if key == SortKey::None && !sort.trim().is_empty() {
            bail!("Unknown sort order: {} (expected price-asc, price-desc or rating)", sort);
        }
        let _ = view.set_sort(key);
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        let min = match &args.min_price {
            Some(v) => Some(parse_price(v, Money::parse_lower_bound)?),
            None => view.criteria().min_price,
        };
        let max = match &args.max_price {
            Some(v) => Some(parse_price(v, Money::parse_upper_bound)?),
            None => view.criteria().max_price,
        };
        let _ = view.set_price_range(min, max);
    }
    Ok(())
}

fn parse_price(input: &str, parse: fn(&str, Currency) -> Option<Money>) -> Result<Money> {
    parse(input, Currency::USD)
        .with_context(|| format!("Invalid price: {} (expected a non-negative amount)", input))
}

fn describe_criteria(criteria: &FilterCriteria, ctx: &Context) {
    if criteria.is_empty() {
        return;
    }
    if let Some(category) = &criteria.category {
        ctx.output.kv("category", category);
    }
    if let Some(min) = criteria.min_price {
        ctx.output.kv("min price", &min.display());
    }
    if let Some(max) = criteria.max_price {
        ctx.output.kv("max price", &max.display());
    }
    if criteria.sort != SortKey::None {
        ctx.output.kv("sort", criteria.sort.display_name());
    }
    ctx.output.info("");
}

/// Show the landing-page selection.
pub async fn featured(args: FeaturedArgs, ctx: &Context) -> Result<()> {
    let limit = args.limit.unwrap_or(ctx.config.display.featured_limit);
    let catalog = ctx.catalog()?;

    let spinner = ctx.output.spinner("Fetching featured products...");
    let result = catalog.featured_products(limit).await;
    spinner.finish_and_clear();

    let products = result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "featured products unavailable");
        ctx.output.error(&format!("Could not load featured products: {}", e));
        Vec::new()
    });

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Featured");
    ctx.output.products(&products);
    Ok(())
}

/// List catalog categories.
pub async fn categories(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    let spinner = ctx.output.spinner("Fetching categories...");
    let result = catalog.categories().await;
    spinner.finish_and_clear();

    let categories = result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "category list unavailable");
        ctx.output.error(&format!("Could not load categories: {}", e));
        Vec::new()
    });

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &categories {
        let link = listing_path(
            ctx.config.display.locale,
            &FilterCriteria::new().with_category(category.as_str()),
        );
        ctx.output.list_item(&format!("{}  {}", category, console::style(link).dim()));
    }
    Ok(())
}

/// Show one product, with its cart and wishlist status.
pub async fn product(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    let spinner = ctx.output.spinner("Fetching product...");
    let result = catalog.product(args.id).await;
    spinner.finish_and_clear();

    let product = match result.with_context(|| format!("Could not load product {}", args.id))? {
        Some(product) => product,
        None => bail!("Product {} not found", args.id),
    };

    let cart = ctx.cart()?;
    let wishlist = ctx.wishlist()?;
    let in_cart = cart.state().line(product.id).map(|line| line.quantity).unwrap_or(0);
    let liked = wishlist.is_member(product.id);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "product": product,
            "in_cart": in_cart,
            "in_wishlist": liked,
            "link": product_path(ctx.config.display.locale, &product),
        }));
        return Ok(());
    }

    ctx.output.header(&product.title);
    ctx.output.kv("id", &product.id.to_string());
    ctx.output.kv("price", &product.price.display());
    ctx.output.kv("category", &product.category);
    ctx.output.kv(
        "rating",
        &format!("{:.1} ({} reviews)", product.rating.rate, product.rating.count),
    );
    ctx.output.kv("in cart", &in_cart.to_string());
    ctx.output.kv("in wishlist", if liked { "yes" } else { "no" });
    ctx.output.kv("link", &product_path(ctx.config.display.locale, &product));
    if !product.description.is_empty() {
        ctx.output.info("");
        println!("{}", product.description);
    }
    Ok(())
}
