// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Adapter between the transform engine and the `image` crate. Decoding and
// encoding are delegated entirely to `image`; this module only moves RGBA8
// buffers across the boundary.

use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use pixelwerk_core::error::{PixelwerkError, Result};
use pixelwerk_core::types::RasterImage;
use tracing::{debug, info, instrument};

/// Take ownership of an `RgbaImage` buffer without copying.
pub fn from_rgba_image(image: RgbaImage) -> Result<RasterImage> {
    let (width, height) = image.dimensions();
    RasterImage::new(width, height, image.into_raw())
}

/// Convert any decoded image to RGBA8 and wrap it.
pub fn from_dynamic(image: DynamicImage) -> Result<RasterImage> {
    from_rgba_image(image.into_rgba8())
}

/// Copy a raster image into an `RgbaImage`.
pub fn to_rgba_image(image: &RasterImage) -> Result<RgbaImage> {
    RgbaImage::from_raw(image.width(), image.height(), image.pixels().to_vec()).ok_or_else(|| {
        PixelwerkError::Encode(format!(
            "buffer does not fit {}x{} RGBA image",
            image.width(),
            image.height()
        ))
    })
}

/// Decode encoded bytes (PNG, JPEG, etc.).
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode(data: &[u8]) -> Result<RasterImage> {
    let img = image::load_from_memory(data)
        .map_err(|err| PixelwerkError::Decode(format!("failed to decode image: {}", err)))?;
    debug!(
        width = img.width(),
        height = img.height(),
        "Image decoded from bytes"
    );
    from_dynamic(img)
}

/// Load and decode an image file.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open(path: impl AsRef<Path>) -> Result<RasterImage> {
    let img = image::open(path.as_ref()).map_err(|err| {
        PixelwerkError::Decode(format!(
            "failed to open {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    info!(width = img.width(), height = img.height(), "Image loaded");
    from_dynamic(img)
}

/// Encode as PNG bytes.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>> {
    let rgba = encodable(image)?;
    let mut buffer = Vec::new();
    rgba.write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|err| PixelwerkError::Encode(format!("PNG encoding failed: {}", err)))?;
    Ok(buffer)
}

/// Write the image to a file. The format is inferred from the file extension.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save(image: &RasterImage, path: impl AsRef<Path>) -> Result<()> {
    let rgba = encodable(image)?;
    rgba.save(path.as_ref()).map_err(|err| {
        PixelwerkError::Encode(format!(
            "failed to save image to {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    info!(
        width = image.width(),
        height = image.height(),
        "Image saved"
    );
    Ok(())
}

fn encodable(image: &RasterImage) -> Result<RgbaImage> {
    if image.is_empty() {
        return Err(PixelwerkError::Encode("cannot encode empty image".into()));
    }
    to_rgba_image(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker() -> RasterImage {
        RasterImage::from_fn(4, 3, |x, y| {
            if (x + y) % 2 == 0 {
                [255, 255, 255, 255]
            } else {
                [10, 20, 30, 128]
            }
        })
    }

    #[test]
    fn rgba_image_conversion_keeps_layout() {
        let rgba = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8, y as u8, 7, 9]));
        let raster = from_rgba_image(rgba.clone()).unwrap();
        assert_eq!(raster.dimensions(), (3, 2));
        assert_eq!(raster.pixel(2, 1), Some([2, 1, 7, 9]));
        assert_eq!(to_rgba_image(&raster).unwrap(), rgba);
    }

    #[test]
    fn non_rgba_input_is_expanded() {
        let gray = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(2, 2, image::Luma([77])));
        let raster = from_dynamic(gray).unwrap();
        assert_eq!(raster.pixel(1, 1), Some([77, 77, 77, 255]));
    }

    #[test]
    fn png_bytes_decode_to_same_pixels() {
        let img = checker();
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..4], &[0x89, 0x50, 0x4E, 0x47]);
        assert_eq!(decode(&bytes).unwrap(), img);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PixelwerkError::Decode(_)));
    }

    #[test]
    fn empty_image_cannot_be_encoded() {
        assert!(matches!(
            encode_png(&RasterImage::empty()),
            Err(PixelwerkError::Encode(_))
        ));
    }

    #[test]
    fn save_and_open_through_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checker.png");
        let img = checker();

        save(&img, &path).unwrap();
        assert_eq!(open(&path).unwrap(), img);
    }

    #[test]
    fn open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = open(dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, PixelwerkError::Decode(_)));
    }
}
