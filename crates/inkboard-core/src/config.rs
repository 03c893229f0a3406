//! Session configuration.

use crate::shapes::Rgba;
use crate::state::{DEFAULT_BRUSH_SIZE, DrawingState};
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of undo steps kept.
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which mutations become their own undo step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryGranularity {
    /// Every mutation is recorded, including each pointer move of a drag.
    #[default]
    EveryUpdate,
    /// Only gesture starts and explicit actions are recorded; the moves,
    /// commit, pans and wheel zooms of a gesture replace the present.
    PerGesture,
}

/// Undo history settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum undo depth; the oldest entries are evicted first.
    pub max_depth: usize,
    pub granularity: HistoryGranularity,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_HISTORY_DEPTH,
            granularity: HistoryGranularity::default(),
        }
    }
}

/// Tool settings of a fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolDefaults {
    pub tool: ToolKind,
    pub color: Rgba,
    pub brush_size: f64,
}

impl Default for ToolDefaults {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pen,
            color: Rgba::black(),
            brush_size: DEFAULT_BRUSH_SIZE,
        }
    }
}

/// Multiplicative zoom steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Wheel step towards the user (scrolling up).
    pub wheel_in: f64,
    /// Wheel step away from the user (scrolling down).
    pub wheel_out: f64,
    /// Toolbar zoom-in button.
    pub button_in: f64,
    /// Toolbar zoom-out button.
    pub button_out: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            wheel_in: 1.1,
            wheel_out: 0.9,
            button_in: 1.2,
            button_out: 0.8,
        }
    }
}

/// Whiteboard session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WhiteboardConfig {
    pub history: HistoryConfig,
    pub defaults: ToolDefaults,
    pub zoom: ZoomConfig,
}

impl WhiteboardConfig {
    /// Parse and validate a configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check the invariants the session relies on.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.history.max_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "history.max_depth",
                reason: "must be at least 1".to_string(),
            });
        }

        let steps = [
            ("zoom.wheel_in", self.zoom.wheel_in, true),
            ("zoom.wheel_out", self.zoom.wheel_out, false),
            ("zoom.button_in", self.zoom.button_in, true),
            ("zoom.button_out", self.zoom.button_out, false),
        ];
        for (field, step, zooms_in) in steps {
            let ok = step.is_finite() && step > 0.0 && (step > 1.0) == zooms_in;
            if !ok {
                let direction = if zooms_in { "greater" } else { "less" };
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{step} must be positive and {direction} than 1"),
                });
            }
        }

        if !self.defaults.brush_size.is_finite() || self.defaults.brush_size <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "defaults.brush_size",
                reason: format!("{} must be positive", self.defaults.brush_size),
            });
        }
        Ok(())
    }

    /// The empty state a session starts from.
    pub fn initial_state(&self) -> DrawingState {
        DrawingState::new(
            self.defaults.tool,
            self.defaults.color,
            self.defaults.brush_size,
        )
    }
}
