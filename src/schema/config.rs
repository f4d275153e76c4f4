//! Configuration types for Game of Life simulations.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Seed;
use crate::compute::GridError;

fn default_side() -> usize {
    25
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Board width in cells.
    #[serde(default = "default_side")]
    pub width: usize,
    /// Board height in cells.
    #[serde(default = "default_side")]
    pub height: usize,
    /// Tick cadence.
    #[serde(default)]
    pub speed: Speed,
    /// Initial board contents.
    #[serde(default)]
    pub seed: Seed,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: default_side(),
            height: default_side(),
            speed: Speed::default(),
            seed: Seed::default(),
        }
    }
}

/// Tick cadence choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speed {
    /// One generation per second.
    #[default]
    Slow,
    /// One generation every half second.
    Normal,
    /// One generation every 330 ms.
    Fast,
    /// Arbitrary interval in milliseconds.
    Custom { interval_ms: u64 },
}

impl Speed {
    /// The fixed choices, slowest first.
    pub const CHOICES: [Speed; 3] = [Speed::Slow, Speed::Normal, Speed::Fast];

    pub fn interval(self) -> Duration {
        match self {
            Speed::Slow => Duration::from_millis(1000),
            Speed::Normal => Duration::from_millis(500),
            Speed::Fast => Duration::from_millis(330),
            Speed::Custom { interval_ms } => Duration::from_millis(interval_ms),
        }
    }
}

impl SimulationConfig {
    /// Get total board size (width * height), `None` on overflow.
    #[inline]
    pub fn grid_size(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size().is_none_or(|size| size == 0) {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.speed.interval().is_zero() {
            return Err(ConfigError::InvalidInterval);
        }
        Ok(())
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: SimulationConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Board dimensions (width, height) must be non-zero and fit in usize")]
    InvalidDimensions,
    #[error("Tick interval must be positive")]
    InvalidInterval,
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Grid(#[from] GridError),
}
