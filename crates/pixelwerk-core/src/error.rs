// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pixelwerk.

use thiserror::Error;

/// Reason a transform rejected its input.
///
/// Preconditions are checked eagerly and in a fixed order, so the reason
/// reported is always the first one that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("cannot process empty image")]
    EmptyImage,

    #[error("starting coordinates out of bounds")]
    StartOutOfBounds,

    #[error("crop height and width must be positive")]
    NonPositiveCropSize,

    #[error("crop dimensions must stay in bounds")]
    CropOutOfBounds,

    #[error("invalid contrast level")]
    InvalidContrastLevel,
}

impl InvalidInput {
    /// Stable, machine-checkable code for this reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyImage => "empty_image",
            Self::StartOutOfBounds => "start_out_of_bounds",
            Self::NonPositiveCropSize => "non_positive_crop_size",
            Self::CropOutOfBounds => "crop_out_of_bounds",
            Self::InvalidContrastLevel => "invalid_contrast_level",
        }
    }
}

/// Top-level error type for all Pixelwerk operations.
#[derive(Debug, Error)]
pub enum PixelwerkError {
    // -- Transform errors --
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("pipeline step {index} failed: {source}")]
    Step {
        index: usize,
        #[source]
        source: Box<PixelwerkError>,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Codec adapter --
    #[error("image decoding failed: {0}")]
    Decode(String),

    #[error("image encoding failed: {0}")]
    Encode(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PixelwerkError {
    /// The rejection reason, if this error (or the pipeline step it wraps)
    /// was caused by invalid transform input.
    pub fn invalid_input(&self) -> Option<InvalidInput> {
        match self {
            Self::InvalidInput(reason) => Some(*reason),
            Self::Step { source, .. } => source.invalid_input(),
            _ => None,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PixelwerkError>;
