// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for pixel buffer construction.

use std::fmt;

/// Errors that can occur while building a [`PixelBuffer`](super::PixelBuffer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// The supplied pixel slice is shorter than `width * height * bpp`.
    BufferTooSmall { needed: usize, actual: usize },
    /// The byte size of the requested geometry does not fit in memory.
    DimensionsTooLarge { width: u32, height: u32 },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { needed, actual } => {
                write!(f, "buffer too small: need {needed} bytes, got {actual}")
            }
            Self::DimensionsTooLarge { width, height } => {
                write!(f, "dimensions too large: {width}x{height}")
            }
        }
    }
}

impl std::error::Error for RasterError {}

pub type Result<T> = std::result::Result<T, RasterError>;
