//! Configuration management for shared-datetime
//!
//! This module handles loading, parsing, validation and application of
//! configuration files.

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, DEFAULT_DATE_FORMAT, DEFAULT_LOCALE, DEFAULT_LONG_FORMAT,
};
use crate::datetime::DateTime;
use crate::locale::{self, Locale, LocaleOverrides, LocaleRegistry};
use anyhow::{Context, Result};
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub locale: LocaleConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Locale configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocaleConfig {
    /// Locale activated on startup (built-in or one of `custom`)
    pub default: String,
    /// Map of locale name -> definition layered on a base locale
    pub custom: HashMap<String, LocaleOverrides>,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Template for dates
    pub date_format: String,
    /// Template for long dates
    pub long_format: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// Maximum level: off, error, warn, info, debug or trace
    pub level: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default: DEFAULT_LOCALE.to_string(),
            custom: HashMap::new(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            long_format: DEFAULT_LONG_FORMAT.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// The configured level as a filter
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.level
            .parse::<LevelFilter>()
            .with_context(|| format!("Invalid logging level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        info!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join(APP_DIR_NAME).join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.logging.level_filter()?;

        if self.display.date_format.trim().is_empty() {
            anyhow::bail!("date_format cannot be empty");
        }
        if self.display.long_format.trim().is_empty() {
            anyhow::bail!("long_format cannot be empty");
        }

        // Validate locales against a scratch registry so the global one stays untouched
        let mut registry = LocaleRegistry::new();
        self.register_custom_locales(|name, overrides| registry.register_overrides(name, overrides))?;
        if !registry.contains(&self.locale.default) {
            anyhow::bail!(
                "default locale '{}' not found. Available locales: {}",
                self.locale.default,
                registry.names().join(", ")
            );
        }

        Ok(())
    }

    /// Register the custom locales and activate the default one
    pub fn apply(&self) -> Result<Arc<Locale>> {
        self.register_custom_locales(locale::register_overrides)?;
        locale::activate(&self.locale.default)
            .with_context(|| format!("Failed to activate locale '{}'", self.locale.default))
    }

    /// Register every custom locale, allowing definitions based on each other
    fn register_custom_locales(
        &self,
        mut register: impl FnMut(&str, &LocaleOverrides) -> crate::error::Result<String>,
    ) -> Result<()> {
        let mut pending: BTreeMap<&str, &LocaleOverrides> = self
            .locale
            .custom
            .iter()
            .map(|(name, overrides)| (name.as_str(), overrides))
            .collect();

        while !pending.is_empty() {
            let mut failures = Vec::new();
            let before = pending.len();
            pending.retain(|name, overrides| match register(*name, *overrides) {
                Ok(_) => false,
                Err(e) => {
                    failures.push(format!("{}: {}", name, e));
                    true
                }
            });

            if pending.len() == before {
                anyhow::bail!("Invalid custom locale definitions: {}", failures.join("; "));
            }
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# shared-datetime Configuration File\n# Generated on {}\n\n",
            DateTime::now().format(DEFAULT_DATE_FORMAT)
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_DIR_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
