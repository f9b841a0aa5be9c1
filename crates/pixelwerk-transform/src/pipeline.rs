// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transform pipelines — an ordered list of transforms described as data, so a
// chain can be stored as JSON and replayed against any image.

use pixelwerk_core::error::{PixelwerkError, Result};
use pixelwerk_core::types::RasterImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::engine::Transformer;

/// A single transform step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Transform {
    Grayscale,
    Contrast {
        level: f64,
    },
    /// Bottom-left-origin crop.
    Crop {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    },
}

impl Transform {
    /// Apply this step to `image`, returning a new image.
    pub fn apply(&self, transformer: &Transformer, image: &RasterImage) -> Result<RasterImage> {
        match *self {
            Self::Grayscale => transformer.grayscale(image),
            Self::Contrast { level } => transformer.contrast(image, level),
            Self::Crop {
                x,
                y,
                width,
                height,
            } => transformer.crop(image, x, y, width, height),
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grayscale => "grayscale",
            Self::Contrast { .. } => "contrast",
            Self::Crop { .. } => "crop",
        }
    }
}

/// Ordered transform chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub steps: Vec<Transform>,
}

impl Pipeline {
    pub fn new(steps: Vec<Transform>) -> Self {
        Self { steps }
    }

    /// Append a step, builder style.
    pub fn then(mut self, step: Transform) -> Self {
        self.steps.push(step);
        self
    }

    /// Parse a pipeline from JSON, either `{"steps": [...]}` or a bare array.
    ///
    /// The shape is chosen from the first non-whitespace character so parse
    /// errors point at the offending step or field.
    pub fn from_json(text: &str) -> Result<Self> {
        if text.trim_start().starts_with('[') {
            let steps: Vec<Transform> = serde_json::from_str(text)?;
            return Ok(Self { steps });
        }
        Ok(serde_json::from_str(text)?)
    }

    /// Run every step in order. The first failure aborts the run and is
    /// reported with its step index; no intermediate image escapes.
    #[instrument(skip_all, fields(steps = self.steps.len()))]
    pub fn run(&self, transformer: &Transformer, image: &RasterImage) -> Result<RasterImage> {
        info!(
            width = image.width(),
            height = image.height(),
            "Running transform pipeline"
        );

        let mut current = image.clone();
        for (index, step) in self.steps.iter().enumerate() {
            current = step
                .apply(transformer, &current)
                .map_err(|err| PixelwerkError::Step {
                    index,
                    source: Box::new(err),
                })?;
            debug!(
                index,
                step = step.name(),
                width = current.width(),
                height = current.height(),
                "Step complete"
            );
        }
        Ok(current)
    }
}
