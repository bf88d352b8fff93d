//! # Configuration
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TILL_STORE_NAME, TILL_CURRENCY_SYMBOL, TILL_LOG_FILTER,            │
//! │     TILL_OUTPUT=text|json, TILL_SEED_DEMO=1                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $TILL_CONFIG, or the platform config dir:                          │
//! │     ~/.config/till-pos/till.toml (Linux)                               │
//! │     ~/Library/Application Support/com.till.pos/till.toml (macOS)       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Corner Shop"
//! currency_symbol = "R$"
//! log_filter = "warn"
//! output = "json"
//! seed_demo_catalog = true
//! ```
//!
//! Configuration is read-only after startup.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliResult;

const CONFIG_FILE_NAME: &str = "till.toml";

/// How listings are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable entity rendering.
    #[default]
    Text,

    /// One JSON object per line.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TillConfig {
    /// Store name (printed on receipts)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Default tracing filter. `RUST_LOG` still wins when set.
    pub log_filter: String,

    /// Listing format for the LIST options
    pub output: OutputFormat,

    /// Load a small demo catalog at startup
    pub seed_demo_catalog: bool,
}

impl Default for TillConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "Till POS"
    /// - Currency: $
    /// - Logging: info, debug for till crates
    /// - Output: text
    /// - Demo catalog: off
    fn default() -> Self {
        TillConfig {
            store_name: "Till POS".to_string(),
            currency_symbol: "$".to_string(),
            log_filter: "info,till=debug".to_string(),
            output: OutputFormat::Text,
            seed_demo_catalog: false,
        }
    }
}

impl TillConfig {
    /// Loads the configuration from file and environment.
    ///
    /// A missing config file is not an error; an unreadable or malformed one
    /// is. Also returns the names of environment variables whose values
    /// could not be parsed and were ignored, so they can be logged once
    /// tracing is up.
    pub fn load() -> CliResult<(Self, Vec<&'static str>)> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => TillConfig::default(),
        };

        let ignored = config.apply_env(|key| std::env::var(key).ok());
        Ok((config, ignored))
    }

    /// Reads a TOML config file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        debug!(path = %path.display(), "Loading config file");
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses TOML; missing keys fall back to defaults.
    pub fn from_toml_str(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `TILL_*` overrides using `lookup` to read variables.
    ///
    /// Returns the keys whose values were present but invalid.
    pub fn apply_env<F>(&mut self, lookup: F) -> Vec<&'static str>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut ignored = Vec::new();

        if let Some(store_name) = lookup("TILL_STORE_NAME") {
            self.store_name = store_name;
        }

        if let Some(symbol) = lookup("TILL_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(filter) = lookup("TILL_LOG_FILTER") {
            self.log_filter = filter;
        }

        if let Some(output) = lookup("TILL_OUTPUT") {
            match output.parse() {
                Ok(format) => self.output = format,
                Err(_) => ignored.push("TILL_OUTPUT"),
            }
        }

        if let Some(seed) = lookup("TILL_SEED_DEMO") {
            match seed.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.seed_demo_catalog = true,
                "0" | "false" | "no" => self.seed_demo_catalog = false,
                _ => ignored.push("TILL_SEED_DEMO"),
            }
        }

        ignored
    }

    /// Formats an amount as a currency string, always two decimals.
    ///
    /// ## Example
    /// ```rust
    /// use till_cli::config::TillConfig;
    ///
    /// let config = TillConfig::default();
    /// assert_eq!(config.format_currency(12.5), "$12.50");
    /// ```
    pub fn format_currency(&self, amount: f64) -> String {
        format!(
            "{}{}{:.2}",
            if amount < 0.0 { "-" } else { "" },
            self.currency_symbol,
            amount.abs()
        )
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("TILL_CONFIG") {
            return Some(PathBuf::from(path));
        }

        ProjectDirs::from("com", "till", "pos").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
