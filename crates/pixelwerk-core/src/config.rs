// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transform engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{PixelwerkError, Result};

/// How the contrast `level` parameter is treated once the singularity at 259
/// has been ruled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelDomain {
    /// Any finite level is used as given.
    #[default]
    Unbounded,
    /// Levels are clamped into [-255, 255].
    Clamped,
}

impl LevelDomain {
    pub const MIN: f64 = -255.0;
    pub const MAX: f64 = 255.0;

    /// Map a level into this domain.
    pub fn apply(self, level: f64) -> f64 {
        match self {
            Self::Unbounded => level,
            Self::Clamped => level.clamp(Self::MIN, Self::MAX),
        }
    }
}

/// Channel weights used to compute luminosity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LumaWeights {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl LumaWeights {
    /// The luminosity method: 0.21 R + 0.72 G + 0.07 B.
    pub const LUMINOSITY: Self = Self {
        r: 0.21,
        g: 0.72,
        b: 0.07,
    };

    pub fn luminosity(&self, r: u8, g: u8, b: u8) -> f64 {
        self.r * f64::from(r) + self.g * f64::from(g) + self.b * f64::from(b)
    }
}

impl Default for LumaWeights {
    fn default() -> Self {
        Self::LUMINOSITY
    }
}

/// Settings for the transform engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Range policy for the contrast level.
    pub contrast_level_domain: LevelDomain,
    /// Weights for grayscale conversion.
    pub grayscale_weights: LumaWeights,
}

impl TransformConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject weights that would produce NaN or negative luminosity.
    pub fn validate(&self) -> Result<()> {
        let LumaWeights { r, g, b } = self.grayscale_weights;
        for (name, w) in [("r", r), ("g", g), ("b", b)] {
            if !w.is_finite() || w < 0.0 {
                return Err(PixelwerkError::Config(format!(
                    "grayscale weight {name} must be finite and non-negative, got {w}"
                )));
            }
        }
        Ok(())
    }
}
