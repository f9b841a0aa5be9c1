// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Pixelwerk.

use serde::{Deserialize, Serialize};

use crate::error::{PixelwerkError, Result};

/// Bytes per interleaved RGBA pixel.
pub const CHANNELS: usize = 4;

/// A decoded raster image: `width * height` pixels stored row-major from the
/// top-left corner, each pixel interleaved as `[R, G, B, A]`.
///
/// The buffer length always equals `width * height * 4`. Images with a zero
/// dimension can be constructed but are rejected by every transform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRaster", into = "RawRaster")]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Wrap an existing RGBA buffer, checking its length against the
    /// dimensions.
    ///
    /// Dimensions whose byte count does not fit `usize` are reported as a
    /// mismatch against `usize::MAX`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = buffer_len(width, height).unwrap_or(usize::MAX);
        if pixels.len() != expected {
            return Err(PixelwerkError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// An image filled with a single RGBA colour.
    pub fn from_pixel(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity(buffer_len(width, height).unwrap_or(0));
        for _ in 0..u64::from(width) * u64::from(height) {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// The zero-sized image.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity(buffer_len(width, height).unwrap_or(0));
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    // -- Accessors ------------------------------------------------------------

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Borrow the interleaved RGBA buffer.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the image and return its RGBA buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Byte offset of pixel `(x, y)`, top-left origin.
    ///
    /// Callers must keep `x < width` and `y < height`.
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// The RGBA value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[i..i + CHANNELS]);
        Some(rgba)
    }

    /// Iterate over pixels as `[R, G, B, A]` slices in row-major order.
    pub fn pixels_rgba(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(CHANNELS)
    }
}

/// Byte length of a `width` x `height` RGBA buffer, if it fits `usize`.
fn buffer_len(width: u32, height: u32) -> Option<usize> {
    usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)?
        .checked_mul(CHANNELS)
}

/// Unchecked serde shape; validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TryFrom<RawRaster> for RasterImage {
    type Error = PixelwerkError;

    fn try_from(raw: RawRaster) -> Result<Self> {
        Self::new(raw.width, raw.height, raw.pixels)
    }
}

impl From<RasterImage> for RawRaster {
    fn from(image: RasterImage) -> Self {
        Self {
            width: image.width,
            height: image.height,
            pixels: image.pixels,
        }
    }
}
