//! Stepper configuration.
//!
//! [`StepperConfig`] gathers every host-supplied knob of a stepper: the
//! linear-mode flag, swipe recognition settings and the geometry used to
//! size the step marker window. It can be built in code or loaded from a
//! TOML or JSON file:
//!
//! ```toml
//! linear = true
//! steps_visible = false
//!
//! [swipe]
//! enabled = true
//! threshold = 50.0
//! max_time_ms = 300
//! exclude_interactive = true
//!
//! [pagination]
//! item_width = 40.0
//! min_window_size = 3
//! ```
//!
//! Missing keys fall back to their defaults; unknown keys are rejected.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use horizon_stepper_core::logging::targets;

use crate::error::{Result, StepperError};
use crate::stepper::gesture::{DEFAULT_SWIPE_MAX_TIME_MS, DEFAULT_SWIPE_THRESHOLD, GestureConfig};
use crate::stepper::paginator::{DEFAULT_ITEM_WIDTH, MIN_WINDOW_SIZE};

/// Top-level stepper configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StepperConfig {
    /// Require every step before the target to be valid when moving forward.
    pub linear: bool,
    /// Whether the header's step strip starts expanded.
    pub steps_visible: bool,
    /// Swipe gesture settings.
    pub swipe: SwipeConfig,
    /// Step marker window settings.
    pub pagination: PaginationConfig,
}

/// Swipe gesture settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwipeConfig {
    /// Master switch; hosts usually enable swiping on touch devices only.
    pub enabled: bool,
    /// Minimum horizontal travel, in pixels.
    pub threshold: f32,
    /// Maximum duration of a swipe, in milliseconds.
    pub max_time_ms: u64,
    /// Ignore touches that start on form controls and links.
    pub exclude_interactive: bool,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: DEFAULT_SWIPE_THRESHOLD,
            max_time_ms: DEFAULT_SWIPE_MAX_TIME_MS,
            exclude_interactive: true,
        }
    }
}

/// Step marker window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    /// Rendered width of a single step marker, in pixels.
    pub item_width: f32,
    /// Lower bound for the window size; at least 3.
    pub min_window_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            item_width: DEFAULT_ITEM_WIDTH,
            min_window_size: MIN_WINDOW_SIZE,
        }
    }
}

impl From<&SwipeConfig> for GestureConfig {
    fn from(config: &SwipeConfig) -> Self {
        Self {
            enabled: config.enabled,
            threshold: config.threshold,
            max_time: Duration::from_millis(config.max_time_ms),
            exclude_interactive: config.exclude_interactive,
        }
    }
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (`.toml`).
    Toml,
    /// JSON (`.json`).
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl StepperConfig {
    // =========================================================================
    // Builder Pattern Methods
    // =========================================================================

    /// Set linear mode using builder pattern.
    pub fn with_linear(mut self, linear: bool) -> Self {
        self.linear = linear;
        self
    }

    /// Set whether the step strip starts expanded using builder pattern.
    pub fn with_steps_visible(mut self, visible: bool) -> Self {
        self.steps_visible = visible;
        self
    }

    /// Replace the swipe settings using builder pattern.
    pub fn with_swipe(mut self, swipe: SwipeConfig) -> Self {
        self.swipe = swipe;
        self
    }

    /// Enable or disable swipe handling using builder pattern.
    pub fn with_swipe_enabled(mut self, enabled: bool) -> Self {
        self.swipe.enabled = enabled;
        self
    }

    /// Replace the pagination settings using builder pattern.
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    // =========================================================================
    // Validation and Loading
    // =========================================================================

    /// Check every value for range problems.
    pub fn validate(&self) -> Result<()> {
        if !self.swipe.threshold.is_finite() || self.swipe.threshold <= 0.0 {
            return Err(StepperError::invalid_config(
                "swipe.threshold",
                format!("must be a positive number, got {}", self.swipe.threshold),
            ));
        }
        if !self.pagination.item_width.is_finite() || self.pagination.item_width <= 0.0 {
            return Err(StepperError::invalid_config(
                "pagination.item_width",
                format!(
                    "must be a positive number, got {}",
                    self.pagination.item_width
                ),
            ));
        }
        if self.pagination.min_window_size < MIN_WINDOW_SIZE {
            return Err(StepperError::invalid_config(
                "pagination.min_window_size",
                format!(
                    "must be at least {MIN_WINDOW_SIZE}, got {}",
                    self.pagination.min_window_size
                ),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse_toml(content, Path::new("<string>"))
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::parse_json(content, Path::new("<string>"))
    }

    /// Load and validate a config file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            StepperError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
        })?;
        let content = std::fs::read_to_string(path).map_err(|e| StepperError::io(path, e))?;

        let config = match format {
            ConfigFormat::Toml => Self::parse_toml(&content, path)?,
            ConfigFormat::Json => Self::parse_json(&content, path)?,
        };
        tracing::debug!(
            target: targets::ENGINE,
            path = %path.display(),
            linear = config.linear,
            "loaded stepper config"
        );
        Ok(config)
    }

    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|source| StepperError::TomlParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn parse_json(content: &str, path: &Path) -> Result<Self> {
        let config: Self =
            serde_json::from_str(content).map_err(|source| StepperError::JsonParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }
}
