// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Configured entry point to the transform engine.

use pixelwerk_core::config::TransformConfig;
use pixelwerk_core::error::Result;
use pixelwerk_core::types::RasterImage;

use super::ops;

/// Transform engine bound to a validated [`TransformConfig`].
///
/// Holds no mutable state: one `Transformer` can serve any number of threads
/// at once, and every call allocates its own output.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transformer {
    config: TransformConfig,
}

impl Transformer {
    /// Validate `config` and build a transformer around it.
    pub fn new(config: TransformConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Grayscale using the configured luminosity weights.
    pub fn grayscale(&self, image: &RasterImage) -> Result<RasterImage> {
        ops::grayscale_with(image, &self.config.grayscale_weights)
    }

    /// Contrast adjustment under the configured level domain.
    pub fn contrast(&self, image: &RasterImage, level: f64) -> Result<RasterImage> {
        ops::contrast_with(image, level, self.config.contrast_level_domain)
    }

    /// Bottom-left-origin crop; see [`ops::crop`].
    pub fn crop(
        &self,
        image: &RasterImage,
        start_x: i64,
        start_y: i64,
        crop_width: i64,
        crop_height: i64,
    ) -> Result<RasterImage> {
        ops::crop(image, start_x, start_y, crop_width, crop_height)
    }
}
