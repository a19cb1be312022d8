//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::branding::{APP_DATA_DIR, CONFIG_DIR_ENV, DATA_DIR_ENV, PIXABAY_KEY_ENV};
use crate::enrichment::DEFAULT_BASE_URL;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl ThemeMode {
    /// Parses a case-insensitive theme name ("auto", "dark" or "light").
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Lowercase name, the inverse of [`ThemeMode::parse`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// Where the inventory is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Inventory data directory. Platform data directory when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Image search service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixabayConfig {
    /// API key. Enrichment is skipped when no key is available.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Endpoint of the search API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds. No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for PixabayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl PixabayConfig {
    /// Resolves the API key: the environment variable wins over the config file.
    ///
    /// Blank keys count as unset.
    pub fn resolved_api_key(&self) -> Option<String> {
        let non_blank = |key: &String| !key.trim().is_empty();
        std::env::var(PIXABAY_KEY_ENV)
            .ok()
            .filter(non_blank)
            .or_else(|| self.api_key.clone().filter(non_blank))
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Fridgify/config.toml`
/// - macOS: `~/Library/Application Support/Fridgify/config.toml`
/// - Windows: `%APPDATA%\Fridgify\config.toml`
///
/// `FRIDGIFY_CONFIG_DIR` overrides the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Storage location
    #[serde(default)]
    pub storage: StorageConfig,
    /// Image search settings
    #[serde(default)]
    pub pixabay: PixabayConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path, honoring `FRIDGIFY_CONFIG_DIR`.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DATA_DIR);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Gets the default inventory data directory, honoring `FRIDGIFY_DATA_DIR`.
    ///
    /// - Linux: `~/.local/share/Fridgify/`
    /// - macOS: `~/Library/Application Support/Fridgify/`
    /// - Windows: `%APPDATA%\Fridgify\`
    pub fn default_data_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        Ok(dirs::data_dir()
            .context("Failed to determine data directory")?
            .join(APP_DATA_DIR))
    }

    /// The directory the inventory is stored in.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_data_dir(),
        }
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path (temp file + rename).
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `base_url` is an http(s) URL
    /// - `timeout_secs`, when set, is non-zero
    /// - `data_dir`, when set, is not an existing regular file
    pub fn validate(&self) -> Result<()> {
        let base_url = &self.pixabay.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            anyhow::bail!("Image search base URL must start with http:// or https://: {base_url}");
        }

        if self.pixabay.timeout_secs == Some(0) {
            anyhow::bail!("Image search timeout must be at least 1 second");
        }

        if let Some(dir) = &self.storage.data_dir {
            if dir.is_file() {
                anyhow::bail!("Data directory is a file: {}", dir.display());
            }
        }

        Ok(())
    }
}
