// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// RON parse failure
    #[error("Failed to parse timing config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Slider multiplier would divide by zero or produce garbage
    #[error("Slider multiplier must be positive and finite, got {0}")]
    InvalidSliderMultiplier(f64),
}

/// Global settings applied to a [`Timings`](crate::Timings) timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Distance-to-time scale factor for sliders
    pub slider_multiplier: f64,
    /// Slider ticks per beat
    pub tick_rate: f64,
    /// Default sample set
    pub base_sample_set: i32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            slider_multiplier: 1.0,
            tick_rate: 1.0,
            base_sample_set: 1,
        }
    }
}

impl TimingConfig {
    /// Parse and validate a config from RON text
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: TimingConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values a timeline divides by
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slider_multiplier.is_finite() && self.slider_multiplier > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidSliderMultiplier(self.slider_multiplier))
        }
    }
}
