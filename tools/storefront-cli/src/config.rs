//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::routes::Locale;

/// File names searched for, in order, in each directory from the working
/// directory up to the root.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Overrides `storage.data_dir`.
pub const DATA_DIR_ENV: &str = "STOREFRONT_DATA_DIR";

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Catalog API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Where cart and wishlist are kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Presentation settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply environment overrides. `lookup` is `std::env::var` outside tests.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(storefront_catalog::BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            self.storage.data_dir = Some(PathBuf::from(dir.trim()));
        }
    }

    /// The directory holding persisted state.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(default_data_dir)
    }

    /// Read a value by dotted key.
    pub fn get(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => Ok(self.api.base_url.clone()),
            ["api", "timeout_secs"] => Ok(self.api.timeout_secs.to_string()),
            ["storage", "data_dir"] => Ok(self.data_dir().display().to_string()),
            ["display", "locale"] => Ok(self.display.locale.code().to_string()),
            ["display", "featured_limit"] => Ok(self.display.featured_limit.to_string()),
            _ => bail!("Unknown config key: {}", key),
        }
    }

    /// Set a value by dotted key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => self.api.base_url = value.to_string(),
            ["api", "timeout_secs"] => {
                self.api.timeout_secs = value
                    .parse()
                    .with_context(|| format!("Invalid timeout: {}", value))?
            }
            ["storage", "data_dir"] => self.storage.data_dir = Some(PathBuf::from(value)),
            ["display", "locale"] => {
                self.display.locale = match Locale::from_code(value) {
                    Some(locale) => locale,
                    None => bail!("Unsupported locale: {} (expected one of en, tr)", value),
                }
            }
            ["display", "featured_limit"] => {
                self.display.featured_limit = value
                    .parse()
                    .with_context(|| format!("Invalid limit: {}", value))?
            }
            _ => bail!("Unknown config key: {}", key),
        }

        Ok(())
    }
}

/// Catalog API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the product API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    storefront_catalog::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Storage settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for persisted state; defaults to `~/.local/share/storefront`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Locale used in generated links.
    #[serde(default)]
    pub locale: Locale,

    /// Products shown by `featured` when no limit is given.
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,
}

fn default_featured_limit() -> usize {
    storefront_catalog::DEFAULT_FEATURED_LIMIT
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            featured_limit: default_featured_limit(),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Get the platform-specific data directory.
fn default_data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share").join("storefront")
    } else {
        std::env::temp_dir().join("storefront")
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront configuration

[api]
base_url = "{base_url}"
timeout_secs = {timeout}

[storage]
# data_dir = "/var/lib/storefront"

[display]
locale = "en"
featured_limit = {featured}
"#,
        base_url = default_base_url(),
        timeout = default_timeout_secs(),
        featured = default_featured_limit(),
    )
}
