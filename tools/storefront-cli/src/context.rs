//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use storefront_cache::FileStore;
use storefront_catalog::CatalogClient;
use storefront_commerce::store::{CartStore, WishlistStore};

use crate::config::{StorefrontConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration, environment overrides applied.
    pub config: StorefrontConfig,
    /// The file the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file or the nearest one found.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (StorefrontConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (StorefrontConfig::load(&path)?, Some(path)),
                None => (StorefrontConfig::default(), None),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());

        tracing::debug!(
            config = ?config_path,
            base_url = %config.api.base_url,
            data_dir = %config.data_dir().display(),
            "loaded configuration"
        );

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Build a catalog client from the API settings.
    pub fn catalog(&self) -> Result<CatalogClient> {
        CatalogClient::new(
            &self.config.api.base_url,
            Duration::from_secs(self.config.api.timeout_secs),
        )
        .with_context(|| format!("Failed to create catalog client for {}", self.config.api.base_url))
    }

    /// Open the persisted cart.
    pub fn cart(&self) -> Result<CartStore<FileStore>> {
        CartStore::open(self.store()?).context("Failed to open cart")
    }

    /// Open the persisted wishlist.
    pub fn wishlist(&self) -> Result<WishlistStore<FileStore>> {
        WishlistStore::open(self.store()?).context("Failed to open wishlist")
    }

    fn store(&self) -> Result<FileStore> {
        let dir = self.config.data_dir();
        FileStore::open(&dir).with_context(|| format!("Failed to open data directory: {}", dir.display()))
    }
}

/// Find the nearest config file, walking up from `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
