//! Editor configuration.

use crate::document::MAX_UNDO_HISTORY;
use crate::gate::GridPoint;
use crate::routing::{EdgeStyle, GateSize};
use crate::snap::GRID_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunables for the graph model and its rendering.
///
/// Missing fields fall back to their defaults, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid unit gates snap to.
    pub grid_size: i64,
    /// Size of every gate body.
    pub gate_size: GateSize,
    /// Where new gates appear (snapped on use).
    pub spawn_position: GridPoint,
    /// Undo states kept; 0 disables history.
    pub max_undo_history: usize,
    /// How wires are drawn.
    pub edge_style: EdgeStyle,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            gate_size: GateSize::default(),
            spawn_position: GridPoint::new(120, 120),
            max_undo_history: MAX_UNDO_HISTORY,
            edge_style: EdgeStyle::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size <= 0 {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be positive, got {}",
                self.grid_size
            )));
        }
        let GateSize { width, height } = self.gate_size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "gate_size must be positive, got {width}x{height}"
            )));
        }
        Ok(())
    }
}
