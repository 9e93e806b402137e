use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::language_utils::normalize_to_engine;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO 639-1 or 639-3)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO 639-1 or 639-3)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Pivot translation settings
    #[serde(default)]
    pub pivot: PivotConfig,

    /// Terminology sources
    #[serde(default)]
    pub terminology: TerminologyConfig,

    /// Engine client settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Two-hop translation through an intermediate language.
///
/// Useful when the engine's direct support for the target language is weak;
/// the placeholder protocol is what keeps the curated terms safe across
/// both hops.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PivotConfig {
    /// Whether to translate source -> pivot -> target instead of directly
    #[serde(default = "default_use_pivot")]
    pub enabled: bool,

    /// Pivot language code
    #[serde(default = "default_pivot_language")]
    pub language: String,
}

/// Terminology source selection
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TerminologyConfig {
    /// Whether to load the builtin dictionary for the target language
    #[serde(default = "default_use_builtin")]
    pub use_builtin: bool,

    /// Optional path to a user-supplied delimited term file
    #[serde(default)]
    pub user_file: Option<PathBuf>,
}

/// Engine client settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of retry attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base backoff time in milliseconds for exponential backoff
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,

    /// Pacing delay between the two hops of a pivot translation
    #[serde(default = "default_hop_delay_ms")]
    pub hop_delay_ms: u64,

    /// Pacing delay between items of a batch
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "twi".to_string()
}

fn default_use_pivot() -> bool {
    true
}

fn default_pivot_language() -> String {
    "th".to_string()
}

fn default_use_builtin() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_backoff_base_ms() -> u64 {
    500
}

fn default_hop_delay_ms() -> u64 {
    300
}

fn default_batch_delay_ms() -> u64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
            pivot: PivotConfig::default(),
            terminology: TerminologyConfig::default(),
            engine: EngineConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Default for PivotConfig {
    fn default() -> Self {
        Self {
            enabled: default_use_pivot(),
            language: default_pivot_language(),
        }
    }
}

impl Default for TerminologyConfig {
    fn default() -> Self {
        Self {
            use_builtin: default_use_builtin(),
            user_file: None,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            backoff_base_ms: default_backoff_base_ms(),
            hop_delay_ms: default_hop_delay_ms(),
            batch_delay_ms: default_batch_delay_ms(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to open config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .context(format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate language codes and engine settings
    pub fn validate(&self) -> Result<()> {
        normalize_to_engine(&self.source_language)
            .map_err(|e| anyhow!("Invalid source language: {}", e))?;
        normalize_to_engine(&self.target_language)
            .map_err(|e| anyhow!("Invalid target language: {}", e))?;
        if self.pivot.enabled {
            normalize_to_engine(&self.pivot.language)
                .map_err(|e| anyhow!("Invalid pivot language: {}", e))?;
        }
        if self.engine.timeout_secs == 0 {
            return Err(anyhow!("Engine timeout must be greater than zero"));
        }
        Ok(())
    }
}
