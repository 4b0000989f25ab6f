// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Input pixel layouts accepted by the adapter.

/// Memory layout of an 8-bit-per-channel input image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// Single channel, 8-bit grayscale.
    Gray8,
    /// 2 channels, 8-bit grayscale + alpha.
    GrayAlpha8,
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
    /// 3 channels, 8-bit BGR.
    Bgr8,
    /// 4 channels, 8-bit BGRA.
    Bgra8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::GrayAlpha8 => 2,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 => 4,
        }
    }

    /// Whether the layout carries its own alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::GrayAlpha8 | Self::Rgba8 | Self::Bgra8)
    }

    /// Expand one pixel (exactly `bytes_per_pixel` bytes) to RGBA.
    /// Layouts without alpha are treated as opaque.
    pub(crate) fn to_rgba(self, px: &[u8]) -> [u8; 4] {
        match self {
            Self::Gray8 => [px[0], px[0], px[0], 255],
            Self::GrayAlpha8 => [px[0], px[0], px[0], px[1]],
            Self::Rgb8 => [px[0], px[1], px[2], 255],
            Self::Rgba8 => [px[0], px[1], px[2], px[3]],
            Self::Bgr8 => [px[2], px[1], px[0], 255],
            Self::Bgra8 => [px[2], px[1], px[0], px[3]],
        }
    }
}
