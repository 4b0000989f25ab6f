// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Crate-level error type.
//!
//! The pixel transforms themselves never fail. [`PhnError`] carries the
//! failures of everything around them (buffer construction, file and
//! container decode/encode, bad arguments) as one opaque fatal error.

use std::fmt;

use crate::raster::RasterError;

/// Errors surfaced to callers of the I/O bridge and the CLI.
#[derive(Debug)]
pub enum PhnError {
    /// A pixel buffer could not be built.
    Raster(RasterError),
    /// The file could not be read or written, or its container format
    /// could not be decoded or encoded.
    #[cfg(feature = "image")]
    Image(image::ImageError),
    /// A caller-supplied argument is unusable.
    InvalidArgument(String),
}

impl fmt::Display for PhnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raster(e) => write!(f, "invalid raster: {e}"),
            #[cfg(feature = "image")]
            Self::Image(e) => write!(f, "image error: {e}"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for PhnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Raster(e) => Some(e),
            #[cfg(feature = "image")]
            Self::Image(e) => Some(e),
            Self::InvalidArgument(_) => None,
        }
    }
}

impl From<RasterError> for PhnError {
    fn from(e: RasterError) -> Self {
        Self::Raster(e)
    }
}

#[cfg(feature = "image")]
impl From<image::ImageError> for PhnError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}
