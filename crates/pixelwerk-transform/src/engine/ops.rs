// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-pixel and per-region transform arithmetic.
//
// Every operation reads its input through a shared reference and allocates a
// fresh output buffer. Preconditions are checked before any allocation, so a
// caller either receives a complete image or an error, never a partial write.

use pixelwerk_core::config::{LevelDomain, LumaWeights};
use pixelwerk_core::error::{InvalidInput, Result};
use pixelwerk_core::types::{CHANNELS, RasterImage};

/// Alpha written by `crop`.
const OPAQUE: u8 = 255;

/// Contrast pivot; channels are scaled around mid-grey.
const MIDPOINT: f64 = 128.0;

/// Level at which the contrast factor's denominator vanishes.
const CONTRAST_SINGULARITY: f64 = 259.0;

// -- Public operations (default configuration) --------------------------------

/// Convert to grayscale using the luminosity method
/// (0.21 R + 0.72 G + 0.07 B). Alpha is preserved.
pub fn grayscale(image: &RasterImage) -> Result<RasterImage> {
    grayscale_with(image, &LumaWeights::LUMINOSITY)
}

/// Adjust contrast by `level`. Positive levels increase contrast, negative
/// levels flatten it; 0 is a no-op. Alpha is preserved.
pub fn contrast(image: &RasterImage, level: f64) -> Result<RasterImage> {
    contrast_with(image, level, LevelDomain::Unbounded)
}

/// Crop a `crop_width` x `crop_height` region whose bottom-left corner sits
/// at (`start_x`, `start_y`) measured from the image's bottom-left corner.
///
/// The result is always fully opaque.
pub fn crop(
    image: &RasterImage,
    start_x: i64,
    start_y: i64,
    crop_width: i64,
    crop_height: i64,
) -> Result<RasterImage> {
    let region = CropRegion::validate(image, start_x, start_y, crop_width, crop_height)?;
    copy_region(image, &region)
}

// -- Configurable variants -----------------------------------------------------

pub(crate) fn grayscale_with(image: &RasterImage, weights: &LumaWeights) -> Result<RasterImage> {
    ensure_not_empty(image)?;

    let mut out = image.pixels().to_vec();
    for px in out.chunks_exact_mut(CHANNELS) {
        let luma = to_channel(weights.luminosity(px[0], px[1], px[2]));
        px[0] = luma;
        px[1] = luma;
        px[2] = luma;
    }
    rebuild(image.width(), image.height(), out)
}

pub(crate) fn contrast_with(
    image: &RasterImage,
    level: f64,
    domain: LevelDomain,
) -> Result<RasterImage> {
    ensure_not_empty(image)?;
    if !level.is_finite() || level == CONTRAST_SINGULARITY {
        return Err(InvalidInput::InvalidContrastLevel.into());
    }

    let factor = contrast_factor(domain.apply(level));
    let mut out = image.pixels().to_vec();
    for px in out.chunks_exact_mut(CHANNELS) {
        for channel in &mut px[..3] {
            *channel = to_channel(factor * (f64::from(*channel) - MIDPOINT) + MIDPOINT);
        }
    }
    rebuild(image.width(), image.height(), out)
}

/// `259 (level + 255) / (255 (259 - level))`; 1.0 at level 0.
///
/// The ratio is taken before scaling so huge finite levels tend to -259/255
/// instead of overflowing to `inf / -inf`.
fn contrast_factor(level: f64) -> f64 {
    (CONTRAST_SINGULARITY / 255.0) * ((level + 255.0) / (CONTRAST_SINGULARITY - level))
}

// -- Cropping -------------------------------------------------------------------

/// A validated crop rectangle in top-left-origin buffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CropRegion {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

impl CropRegion {
    /// Check the crop parameters in order and convert them to buffer
    /// coordinates. The first failing check determines the error.
    fn validate(
        image: &RasterImage,
        start_x: i64,
        start_y: i64,
        crop_width: i64,
        crop_height: i64,
    ) -> Result<Self> {
        ensure_not_empty(image)?;

        let image_w = i64::from(image.width());
        let image_h = i64::from(image.height());

        if start_x > image_w || start_y > image_h {
            return Err(InvalidInput::StartOutOfBounds.into());
        }
        if start_x < 0 || start_y < 0 {
            return Err(InvalidInput::StartOutOfBounds.into());
        }
        if crop_width <= 0 || crop_height <= 0 {
            return Err(InvalidInput::NonPositiveCropSize.into());
        }
        if start_x.saturating_add(crop_width) > image_w
            || start_y.saturating_add(crop_height) > image_h
        {
            return Err(InvalidInput::CropOutOfBounds.into());
        }

        // All four values now lie within [0, image dimension], so they fit u32.
        let (start_x, start_y) = (start_x as u32, start_y as u32);
        let (width, height) = (crop_width as u32, crop_height as u32);
        Ok(Self {
            left: start_x,
            top: bottom_left_to_top_row(image.height(), start_y, height),
            width,
            height,
        })
    }
}

/// Convert a bottom-left-origin region to its first top-left-origin row.
///
/// A region starting `start_y` rows above the bottom edge and `height` rows
/// tall covers buffer rows `[image_height - start_y - height, image_height - start_y)`.
/// Requires `start_y + height <= image_height`.
fn bottom_left_to_top_row(image_height: u32, start_y: u32, height: u32) -> u32 {
    image_height - start_y - height
}

fn copy_region(image: &RasterImage, region: &CropRegion) -> Result<RasterImage> {
    let row_bytes = region.width as usize * CHANNELS;
    let mut out = Vec::with_capacity(row_bytes * region.height as usize);
    let src = image.pixels();

    for dy in 0..region.height {
        let start = image.offset(region.left, region.top + dy);
        for px in src[start..start + row_bytes].chunks_exact(CHANNELS) {
            out.extend_from_slice(&[px[0], px[1], px[2], OPAQUE]);
        }
    }

    rebuild(region.width, region.height, out)
}

// -- Helpers --------------------------------------------------------------------

fn ensure_not_empty(image: &RasterImage) -> Result<()> {
    if image.is_empty() {
        return Err(InvalidInput::EmptyImage.into());
    }
    Ok(())
}

/// Clamp into byte range and round to the nearest integer.
fn to_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

fn rebuild(width: u32, height: u32, pixels: Vec<u8>) -> Result<RasterImage> {
    RasterImage::new(width, height, pixels)
}
