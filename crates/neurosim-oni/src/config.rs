// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Analysis configuration.
//!
//! Options are an explicit value passed into each call; the engine keeps no
//! process-wide state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options controlling the ONI export analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Stride applied to the time vector and voltage traces when building
    /// the downsampled activity series
    pub downsample_factor: usize,
    /// Disable to skip per-layer synchrony/coherence computation; the
    /// affected fields stay at their zero defaults
    pub compute_coherence: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            downsample_factor: 10,
            compute_coherence: true,
        }
    }
}

/// Errors from loading or validating an [`AnalysisConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse analysis config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid analysis config: {0}")]
    Invalid(String),
}

impl AnalysisConfig {
    /// Load from TOML text, filling unspecified fields with defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.downsample_factor == 0 {
            return Err(ConfigError::Invalid(
                "downsample_factor must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}
