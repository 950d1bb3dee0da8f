//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, StorefrontConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output.kv("timeout_secs", &ctx.config.api.timeout_secs.to_string());

    ctx.output.info("[storage]");
    ctx.output.kv("data_dir", &ctx.config.data_dir().display().to_string());

    ctx.output.info("[display]");
    ctx.output.kv("locale", ctx.config.display.locale.code());
    ctx.output.kv("featured_limit", &ctx.config.display.featured_limit.to_string());

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = ctx.config.get(key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        bail!("No config file found. Run `storefront config init` to create one.");
    };

    // Re-read the file so environment overrides are not written back.
    let mut config = StorefrontConfig::load(path)?;
    config.set(key, value)?;
    config.save(path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
