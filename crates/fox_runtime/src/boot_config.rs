//! Boot Configuration
//!
//! Settles everything the runtime needs before the first tick.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables: `FOX_SEED`, `FOX_TICKS`, `FOX_DEBUG`
//! 2. Config file: `$FOX_CONFIG`, else `fox.toml` in the working directory
//! 3. Built-in defaults
//!
//! # Example Config File
//!
//! ```toml
//! ticks = 3600
//! tick_rate = 60.0
//! debug = false
//!
//! [game]
//! seed = 42
//! max_pickups = 5
//! zero_count_policy = "Forgive"
//!
//! [game.forest]
//! tree_count = 200
//! ```

use fox_sim::config::GameConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file used when `FOX_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "fox.toml";

/// Boot errors
#[derive(Debug, Error)]
pub enum BootError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse boot config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Invalid boot config: {0}")]
    Invalid(String),
}

/// Complete boot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// Simulation settings
    pub game: GameConfig,
    /// Ticks to run before exiting
    pub ticks: u64,
    /// Fixed tick rate in Hz
    pub tick_rate: f32,
    /// Sleep between ticks to run in real time
    pub realtime: bool,
    /// Enable debug logging
    pub debug: bool,
    /// Where the config came from
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            ticks: 60 * 60,
            tick_rate: 60.0,
            realtime: false,
            debug: false,
            config_path: None,
        }
    }
}

impl BootConfig {
    /// Load boot configuration from all sources
    pub fn load() -> Result<Self, BootError> {
        let mut config = match std::env::var("FOX_CONFIG") {
            Ok(path) if !path.is_empty() => Self::load_from_file(&path)?,
            _ if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load_from_file(DEFAULT_CONFIG_FILE)?,
            _ => Self::default(),
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, BootError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| BootError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        log::info!("Loaded boot config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, BootError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides read through `var`
    pub fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), BootError> {
        if let Some(value) = var("FOX_SEED") {
            self.game.seed = parse_seed(&value).ok_or(BootError::InvalidEnv {
                var: "FOX_SEED",
                value,
            })?;
            log::info!("Seed from env: {:#x}", self.game.seed);
        }

        if let Some(value) = var("FOX_TICKS") {
            self.ticks = value.trim().parse().map_err(|_| BootError::InvalidEnv {
                var: "FOX_TICKS",
                value,
            })?;
        }

        if let Some(value) = var("FOX_DEBUG") {
            self.debug = value.is_empty() || value == "1" || value.eq_ignore_ascii_case("true");
        }

        Ok(())
    }

    /// Check the runtime fields and the game config
    pub fn validate(&self) -> Result<(), BootError> {
        if self.tick_rate.is_nan() || self.tick_rate <= 0.0 {
            return Err(BootError::Invalid(format!(
                "tick_rate must be positive, got {}",
                self.tick_rate
            )));
        }
        self.game
            .validate()
            .map_err(|e| BootError::Invalid(e.to_string()))
    }

    /// Seconds per tick
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate
    }

    /// Default log filter for this config
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }

    /// Log a summary of the boot configuration
    pub fn print_summary(&self) {
        log::info!("Boot configuration:");
        match &self.config_path {
            Some(path) => log::info!("  Source: {}", path.display()),
            None => log::info!("  Source: defaults"),
        }
        log::info!("  Seed: {:#x}", self.game.seed);
        log::info!("  Ticks: {} at {} Hz", self.ticks, self.tick_rate);
        log::info!("  Pickups to threshold: {}", self.game.max_pickups);
        log::info!("  Caught empty-handed: {:?}", self.game.zero_count_policy);
        log::info!("  Trees: {}", self.game.forest.tree_count);
        log::info!("  Debug: {}", self.debug);
    }
}

/// Decimal or `0x`-prefixed hex
fn parse_seed(value: &str) -> Option<u64> {
    let value = value.trim();
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16).ok(),
        None => value.parse().ok(),
    }
}
