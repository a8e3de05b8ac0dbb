use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{HIT_SAMPLES, HIT_TOLERANCE};
use crate::input::GestureConfig;
use crate::palette::PaletteColor;

/// Errors that can occur while loading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Tunables for the drawing surface and its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Width given to the fastest strokes
    pub min_line_width: f32,
    /// Width given to the slowest strokes
    pub max_line_width: f32,
    /// Distance within which a tap selects a line
    pub hit_tolerance: f32,
    /// Samples taken along each line when hit testing
    pub hit_samples: usize,
    /// Outline width of circles
    pub circle_line_width: f32,
    /// Color for new lines until the palette is used
    pub initial_color: PaletteColor,
    pub gestures: GestureConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_line_width: 1.0,
            max_line_width: 10.0,
            hit_tolerance: HIT_TOLERANCE,
            hit_samples: HIT_SAMPLES,
            circle_line_width: 10.0,
            initial_color: PaletteColor::Black,
            gestures: GestureConfig::default(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values every line and hit test relies on: widths are
    /// positive and ordered, and hit testing has a positive reach.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("min_line_width", self.min_line_width)?;
        require_positive("max_line_width", self.max_line_width)?;
        require_positive("hit_tolerance", self.hit_tolerance)?;
        require_positive("circle_line_width", self.circle_line_width)?;

        if self.min_line_width > self.max_line_width {
            return Err(ConfigError::Invalid(format!(
                "min_line_width {} exceeds max_line_width {}",
                self.min_line_width, self.max_line_width
            )));
        }
        if self.hit_samples == 0 {
            return Err(ConfigError::Invalid("hit_samples must be at least 1".into()));
        }
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Loads `path` if it exists, falling back to defaults on any problem.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }
}

fn require_positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}
