//! # CLI Error Type
//!
//! Unified error type for the terminal application.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Till POS                               │
//! │                                                                         │
//! │  Bad keyboard input ("abc" as a price)                                 │
//! │       └──► shown to the user, prompt repeats (never an Err)            │
//! │                                                                         │
//! │  Not found (product name, sale id)                                     │
//! │       └──► CoreError rendered as a message, menu continues             │
//! │                                                                         │
//! │  Terminal closed (EOF)                                                 │
//! │       └──► CliError::InputClosed, unwinds to run(), clean exit         │
//! │                                                                         │
//! │  I/O failure, unreadable config file                                   │
//! │       └──► CliError, reported by main(), exit code 1                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use till_core::{CoreError, ValidationError};

#[derive(Debug, Error)]
pub enum CliError {
    /// Reading the terminal or writing to it failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Standard input reached end of file.
    #[error("Input closed")]
    InputClosed,

    /// The TOML config file could not be parsed.
    #[error("Invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    /// A listing could not be rendered as JSON.
    #[error("JSON rendering failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
