// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! # phn
//!
//! Hide one image inside another. Every R, G, B channel of the visible
//! ("source") image is nudged up or down by at most `depth` levels, with
//! the nudge size taken from the matching channel of the hidden image. The
//! result looks like the source; subtracting the source back out and
//! rescaling recovers an approximation of the hidden image.
//!
//! - [`raster`]: RGBA8 [`PixelBuffer`] plus the alignment of a second
//!   image to the first one's bounds.
//! - [`hide`]: the encode/decode transforms and their row-parallel
//!   executor.
//! - `imaging` (feature `image`): file I/O and blur-based estimate mode.
//!
//! This is a data-hiding toy, not a cipher: anyone holding the source and
//! the depth can read the hidden image.
//!
//! # Quick start
//!
//! ```rust
//! use phn::{decode, encode, Bounds, PixelBuffer};
//!
//! let source = PixelBuffer::uniform(Bounds::from_size(4, 4), [128, 128, 128, 255]).unwrap();
//! let hidden = PixelBuffer::uniform(Bounds::from_size(4, 4), [255, 255, 255, 255]).unwrap();
//!
//! let encoded = encode(&source, &hidden, 10);
//! let recovered = decode(&encoded, &source, 0); // 0 = read depth from the marker pixel
//! assert_eq!(recovered.pixel(0, 0), Some([255, 255, 255, 255]));
//! ```

pub mod error;
pub mod hide;
pub mod raster;

#[cfg(feature = "image")]
pub mod imaging;

pub use error::PhnError;
pub use hide::{decode, decode_with, encode, encode_with, infer_depth};
pub use hide::{DecodeParams, EncodeParams, Parallelism, DEFAULT_DEPTH, FALLBACK_DEPTH};
pub use raster::{Bounds, PixelBuffer, PixelLayout, RasterError};
