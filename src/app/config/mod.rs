// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[api]` - Service location, credential, timeout and vote query
//! - `[gallery]` - Grid layout and thumbnail cache
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI argument or `CAT_GALLERY_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use cat_gallery::app::config;
//!
//! let (config, warning) = config::load();
//! if let Some(key) = warning {
//!     eprintln!("settings ignored: {key}");
//! }
//! println!("{} columns", config.gallery.clamped_columns());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::api::{ClientConfig, SortOrder, VoteQuery};
use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default, deserialize_with = "deserialize_theme_mode")]
    pub theme_mode: ThemeMode,
}

/// Remote service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Credential used when neither `--api-key` nor `CAT_GALLERY_API_KEY` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `limit` sent with `GET /votes`; unset means the service default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes_limit: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes_order: Option<SortOrder>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            votes_limit: None,
            votes_order: None,
        }
    }
}

impl ApiConfig {
    /// Query used for every `GET /votes`.
    #[must_use]
    pub fn vote_query(&self) -> VoteQuery {
        VoteQuery {
            limit: self.votes_limit,
            order: self.votes_order,
        }
    }

    /// Client settings with the resolved credential.
    #[must_use]
    pub fn client_config(&self, api_key: Option<String>) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            api_key,
            timeout: Duration::from_secs(
                self.timeout_secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS),
            ),
        }
    }
}

/// Images screen settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GalleryConfig {
    #[serde(default = "default_columns")]
    pub columns: u16,

    #[serde(default = "default_thumbnail_cache_size")]
    pub thumbnail_cache_size: usize,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            thumbnail_cache_size: DEFAULT_THUMBNAIL_CACHE_SIZE,
        }
    }
}

impl GalleryConfig {
    /// Column count clamped to the supported range.
    #[must_use]
    pub fn clamped_columns(&self) -> u16 {
        self.columns.clamp(MIN_COLUMNS, MAX_COLUMNS)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_columns() -> u16 {
    DEFAULT_COLUMNS
}

fn default_thumbnail_cache_size() -> usize {
    DEFAULT_THUMBNAIL_CACHE_SIZE
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default location.
///
/// Returns the configuration and an optional i18n warning key when the file
/// exists but could not be read; defaults are used in that case.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "unreadable settings file");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
