// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Image-in-image hiding and recovery.
//!
//! - **Encode** (`encode` / `encode_with`): each R, G, B channel of the
//!   source is moved up or down by `level(hidden, depth)`, a value in
//!   `[0, depth]`. The direction is forced near saturation and otherwise
//!   chosen by a seeded coin flip, so the hidden pattern does not show up
//!   as a uniform tint. The bottom-right red channel then carries the
//!   depth itself.
//!
//! - **Decode** (`decode` / `decode_with`): the absolute per-channel
//!   difference between encoded output and source is rescaled from
//!   `[0, depth]` back to `[0, 255]`. A depth of 0 reads it from the
//!   marker pixel.
//!
//! Both run row bands concurrently through [`rows::for_each_band`]. The
//! scheme hides data from casual viewing; it provides no secrecy once the
//! source and depth are known.

pub mod decode;
pub mod encode;
pub mod level;
pub mod params;
pub mod rows;

pub use decode::{decode, decode_with, infer_depth};
pub use encode::{encode, encode_with};
pub use params::{DecodeParams, EncodeParams, Parallelism, DEFAULT_DEPTH, FALLBACK_DEPTH};
