// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Bridge to the `image` crate (feature `image`).
//!
//! - `load` / `save`: read any supported container into a [`PixelBuffer`]
//!   and write one back out (format chosen by file extension).
//! - `blur`: Gaussian blur of a buffer.
//! - `estimate`: decode without the original source, using a blurred copy
//!   of the encoded image in its place.
//! - `parse_hex_colour`: lenient `RRGGBB` parsing for uniform backgrounds.

use std::path::Path;

use image::{DynamicImage, RgbaImage};

use crate::error::PhnError;
use crate::hide::{decode_with, DecodeParams};
use crate::raster::PixelBuffer;

/// Channel value used for missing or unparsable colour components.
pub const DEFAULT_BACKGROUND: u8 = 127;

/// Normalize a decoded image into RGBA8.
pub fn from_dynamic(img: &DynamicImage) -> Result<PixelBuffer, PhnError> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelBuffer::from_raw(width, height, rgba.into_raw())?)
}

/// Copy a buffer into an `image` RGBA image. The origin is dropped.
pub fn to_rgba_image(buf: &PixelBuffer) -> Result<RgbaImage, PhnError> {
    RgbaImage::from_raw(buf.width(), buf.height(), buf.as_raw().to_vec()).ok_or_else(|| {
        PhnError::InvalidArgument(format!(
            "pixel data does not cover {}x{}",
            buf.width(),
            buf.height()
        ))
    })
}

/// Load and decode an image file.
pub fn load(path: &Path) -> Result<PixelBuffer, PhnError> {
    let buf = from_dynamic(&image::open(path)?)?;
    log::debug!(
        "loaded {} ({}x{})",
        path.display(),
        buf.width(),
        buf.height()
    );
    Ok(buf)
}

/// Encode a buffer to `path`; the container is picked from the extension.
pub fn save(buf: &PixelBuffer, path: &Path) -> Result<(), PhnError> {
    to_rgba_image(buf)?.save(path)?;
    log::debug!(
        "wrote {} ({}x{})",
        path.display(),
        buf.width(),
        buf.height()
    );
    Ok(())
}

/// Gaussian blur with standard deviation `sigma`, keeping the origin.
pub fn blur(buf: &PixelBuffer, sigma: f32) -> Result<PixelBuffer, PhnError> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(PhnError::InvalidArgument(format!(
            "blur sigma must be positive, got {sigma}"
        )));
    }
    if buf.is_empty() {
        return Ok(buf.clone());
    }
    let blurred = image::imageops::blur(&to_rgba_image(buf)?, sigma);
    let (width, height) = blurred.dimensions();
    let bounds = buf.bounds();
    Ok(PixelBuffer::from_raw(width, height, blurred.into_raw())?.with_origin(bounds.x, bounds.y))
}

/// Decode `encoded` against a blurred copy of itself.
///
/// The blur smooths away most of the per-pixel perturbation, so the
/// blurred copy stands in for the unknown pre-encoding source.
pub fn estimate(
    encoded: &PixelBuffer,
    sigma: f32,
    params: &DecodeParams,
) -> Result<PixelBuffer, PhnError> {
    let approx_source = blur(encoded, sigma)?;
    Ok(decode_with(encoded, &approx_source, params))
}

/// Parse `RRGGBB` hex into RGB.
///
/// Components that are missing fall back to [`DEFAULT_BACKGROUND`]; input
/// that is not valid hex yields the default gray.
pub fn parse_hex_colour(hex: &str) -> [u8; 3] {
    let mut rgb = [DEFAULT_BACKGROUND; 3];
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() % 2 != 0 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        if !hex.is_empty() {
            log::warn!("ignoring invalid colour {hex:?}");
        }
        return rgb;
    }
    for (slot, i) in rgb.iter_mut().zip((0..hex.len()).step_by(2)) {
        // Validated above: every pair is two ASCII hex digits.
        if let Ok(v) = u8::from_str_radix(&hex[i..i + 2], 16) {
            *slot = v;
        }
    }
    rgb
}
