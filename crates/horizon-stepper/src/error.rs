//! Error types for Horizon Stepper.
//!
//! Navigation never fails with an error: a refused move returns `false` and
//! is reported through [`NavigationAttempt`](crate::stepper::NavigationAttempt).
//! The errors here cover the fallible surfaces around the engine, which is
//! configuration loading and validation.

use std::path::PathBuf;

/// Result type alias for stepper operations.
pub type Result<T> = std::result::Result<T, StepperError>;

/// Errors that can occur while setting up a stepper.
#[derive(Debug, thiserror::Error)]
pub enum StepperError {
    /// Reading a configuration file failed.
    #[error("Failed to read stepper config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A TOML configuration could not be parsed.
    #[error("Invalid TOML in stepper config '{path}': {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A JSON configuration could not be parsed.
    #[error("Invalid JSON in stepper config '{path}': {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration file extension is not a supported format.
    #[error("Unsupported stepper config format: '{path}'")]
    UnsupportedFormat { path: PathBuf },

    /// A configuration value is out of range.
    #[error("Invalid value for config field '{field}': {message}")]
    InvalidConfig { field: &'static str, message: String },
}

impl StepperError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a config value error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    /// Returns true if this error was caused by a bad config value.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}
