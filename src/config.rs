//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\tunehound\config.toml
//! - macOS: ~/Library/Application Support/tunehound/config.toml
//! - Linux: ~/.config/tunehound/config.toml
//!
//! The config file is human-readable and editable. CLI flags and environment
//! variables override whatever is stored here.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::matching::SearchConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Search engine settings
    pub search: SearchSettings,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Discogs personal access token
    pub discogs_token: Option<String>,
}

/// Search engine settings.
///
/// The defaults are the values the scoring thresholds were tuned against;
/// the batch size in particular is a provider rate-budget limit, not a
/// performance knob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Hard cap on strategies per search run
    pub max_strategies: usize,

    /// Concurrent provider calls per batch
    pub batch_size: usize,

    /// Delay between batches, in milliseconds
    pub batch_delay_ms: u64,

    /// External confidence at which typo-fix strategies are skipped
    pub skip_typo_confidence: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let engine = SearchConfig::default();
        Self {
            max_strategies: engine.max_strategies,
            batch_size: engine.batch_size,
            batch_delay_ms: engine.batch_delay.as_millis() as u64,
            skip_typo_confidence: engine.skip_typo_confidence,
        }
    }
}

impl SearchSettings {
    /// Convert into the engine's config type.
    pub fn to_search_config(&self) -> SearchConfig {
        SearchConfig {
            max_strategies: self.max_strategies,
            batch_size: self.batch_size,
            batch_delay: Duration::from_millis(self.batch_delay_ms),
            skip_typo_confidence: self.skip_typo_confidence,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tunehound"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to the default config directory.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &dir)
}

/// Save configuration into a specific directory.
///
/// Creates the directory if it doesn't exist. Writes atomically
/// (write to temp, then rename).
pub fn save_to(config: &Config, dir: &std::path::Path) -> Result<(), ConfigError> {
    let path = dir.join("config.toml");

    std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
