//! Configuration management for the Geocodr CLI
//!
//! Stores the plugin options and display locale in ~/.config/geocodr/config.toml

use anyhow::{Context, Result};
use mapapp_search_geocodr::{Geocodr, GeocodrOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "geocodr";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_LOCALE: &str = "en";

/// Overrides the stored access key at run time
pub const API_KEY_ENV: &str = "GEOCODR_API_KEY";

/// CLI Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Plugin options, only what differs from the defaults
    #[serde(default)]
    pub options: GeocodrOptions,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {:?}", dir))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    pub fn locale(&self) -> &str {
        self.locale.as_deref().unwrap_or(DEFAULT_LOCALE)
    }

    /// Options used for a search: stored options plus environment overrides
    pub fn effective_options(&self) -> GeocodrOptions {
        let mut options = self.options.clone();
        if let Some(key) = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
        {
            options.key = Some(key);
        }
        options
    }

    /// Change the options, keeping them only if a provider accepts them
    ///
    /// The stored form is the provider's minimal diff against the defaults.
    pub fn update_options<F>(&mut self, change: F) -> Result<()>
    where
        F: FnOnce(&mut GeocodrOptions) -> Result<()>,
    {
        let mut options = self.options.clone();
        change(&mut options)?;

        let provider = Geocodr::new(&options).context("Invalid Geocodr options")?;
        self.options = provider.to_config();
        Ok(())
    }
}
