// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! In-memory RGBA8 rasters.
//!
//! Every image entering the hiding pipeline is first normalized into a
//! [`PixelBuffer`]: four 8-bit channels (R, G, B, A), fixed stride, known
//! [`Bounds`]. When two images are processed together the second one is
//! re-cut to the first one's bounds (cropped or zero-extended) before any
//! pixel math runs. This module performs no numeric transform.

pub mod bounds;
pub mod buffer;
pub mod error;
pub mod layout;

pub use bounds::Bounds;
pub use buffer::{PixelBuffer, CHANNELS};
pub use error::RasterError;
pub use layout::PixelLayout;
