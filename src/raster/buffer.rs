// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Owned RGBA8 raster with a fixed 4-byte-per-pixel stride.

use super::bounds::Bounds;
use super::error::{RasterError, Result};
use super::layout::PixelLayout;

/// Bytes per RGBA8 pixel.
pub const CHANNELS: usize = 4;

/// An owned, tightly packed RGBA8 image.
///
/// Rows are `stride = width * 4` bytes apart and channels are always in
/// R, G, B, A order. Pixel coordinates passed to accessors are relative to
/// the buffer's own origin; alignment between two buffers uses absolute
/// coordinates (see [`PixelBuffer::cloned_with_bounds`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    bounds: Bounds,
    stride: usize,
    pix: Vec<u8>,
}

/// Byte length of an RGBA8 buffer covering `bounds`.
fn byte_len(bounds: Bounds) -> Result<usize> {
    (bounds.width as usize)
        .checked_mul(bounds.height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(RasterError::DimensionsTooLarge {
            width: bounds.width,
            height: bounds.height,
        })
}

impl PixelBuffer {
    /// A zero-filled (fully transparent black) buffer.
    pub fn new(bounds: Bounds) -> Result<Self> {
        let len = byte_len(bounds)?;
        Ok(Self {
            bounds,
            stride: bounds.width as usize * CHANNELS,
            pix: vec![0u8; len],
        })
    }

    /// A buffer filled with one colour.
    pub fn uniform(bounds: Bounds, rgba: [u8; 4]) -> Result<Self> {
        let mut buf = Self::new(bounds)?;
        for px in buf.pix.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&rgba);
        }
        Ok(buf)
    }

    /// Wrap tightly packed RGBA8 bytes. Trailing bytes past
    /// `width * height * 4` are dropped.
    pub fn from_raw(width: u32, height: u32, mut pix: Vec<u8>) -> Result<Self> {
        let bounds = Bounds::from_size(width, height);
        let needed = byte_len(bounds)?;
        if pix.len() < needed {
            return Err(RasterError::BufferTooSmall {
                needed,
                actual: pix.len(),
            });
        }
        pix.truncate(needed);
        Ok(Self {
            bounds,
            stride: width as usize * CHANNELS,
            pix,
        })
    }

    /// Normalize tightly packed pixels of any supported layout into RGBA8.
    pub fn from_pixels(
        pixels: &[u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<Self> {
        if layout == PixelLayout::Rgba8 {
            let needed = byte_len(Bounds::from_size(width, height))?;
            let src = pixels.get(..needed).ok_or(RasterError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            })?;
            return Self::from_raw(width, height, src.to_vec());
        }

        let bpp = layout.bytes_per_pixel();
        let needed = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(bpp))
            .ok_or(RasterError::DimensionsTooLarge { width, height })?;
        if pixels.len() < needed {
            return Err(RasterError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }

        let mut buf = Self::new(Bounds::from_size(width, height))?;
        for (dst, src) in buf
            .pix
            .chunks_exact_mut(CHANNELS)
            .zip(pixels[..needed].chunks_exact(bpp))
        {
            dst.copy_from_slice(&layout.to_rgba(src));
        }
        Ok(buf)
    }

    /// Move the buffer to a new origin without touching its pixels.
    #[must_use]
    pub fn with_origin(mut self, x: i32, y: i32) -> Self {
        self.bounds.x = x;
        self.bounds.y = y;
        self
    }

    /// Copy of this image re-cut to `bounds`.
    ///
    /// Pixels inside both extents are copied at identical absolute
    /// coordinates; pixels of `bounds` outside this image stay zero.
    pub fn cloned_with_bounds(&self, bounds: Bounds) -> Result<PixelBuffer> {
        if self.bounds == bounds {
            return Ok(self.clone());
        }
        Ok(self.realigned(PixelBuffer::new(bounds)?))
    }

    /// [`cloned_with_bounds`](Self::cloned_with_bounds) for `target`'s
    /// bounds. Infallible because a buffer of `target`'s size already exists.
    pub(crate) fn aligned_to(&self, target: &PixelBuffer) -> PixelBuffer {
        if self.bounds == target.bounds {
            return self.clone();
        }
        self.realigned(target.blank())
    }

    /// Fill the zeroed `dst` from this image over the shared extent.
    fn realigned(&self, mut dst: PixelBuffer) -> PixelBuffer {
        self.copy_overlap_into(&mut dst);
        dst
    }

    /// Zero-filled buffer with this buffer's geometry.
    pub(crate) fn blank(&self) -> PixelBuffer {
        PixelBuffer {
            bounds: self.bounds,
            stride: self.stride,
            pix: vec![0u8; self.pix.len()],
        }
    }

    fn copy_overlap_into(&self, dst: &mut PixelBuffer) {
        let overlap = dst.bounds.intersect(&self.bounds);
        if overlap.is_empty() {
            return;
        }
        let run = overlap.width as usize * CHANNELS;
        let src_x = (i64::from(overlap.x) - i64::from(self.bounds.x)) as usize * CHANNELS;
        let dst_x = (i64::from(overlap.x) - i64::from(dst.bounds.x)) as usize * CHANNELS;
        let src_y = (i64::from(overlap.y) - i64::from(self.bounds.y)) as usize;
        let dst_y = (i64::from(overlap.y) - i64::from(dst.bounds.y)) as usize;

        for row in 0..overlap.height as usize {
            let s = (src_y + row) * self.stride + src_x;
            let d = (dst_y + row) * dst.stride + dst_x;
            dst.pix[d..d + run].copy_from_slice(&self.pix[s..s + run]);
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    pub fn height(&self) -> u32 {
        self.bounds.height
    }

    /// Bytes between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Byte offset of pixel `(x, y)` relative to the origin.
    pub(crate) fn offset(&self, x: usize, y: usize) -> usize {
        y * self.stride + x * CHANNELS
    }

    /// RGBA of pixel `(x, y)` relative to the origin.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.bounds.width || y >= self.bounds.height {
            return None;
        }
        let i = self.offset(x as usize, y as usize);
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pix[i..i + CHANNELS]);
        Some(px)
    }

    /// Overwrite pixel `(x, y)`. Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.bounds.width || y >= self.bounds.height {
            return;
        }
        let i = self.offset(x as usize, y as usize);
        self.pix[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// One row of RGBA bytes.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.bounds.height {
            return None;
        }
        let start = y as usize * self.stride;
        Some(&self.pix[start..start + self.stride])
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.pix
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.pix
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pix
    }
}
