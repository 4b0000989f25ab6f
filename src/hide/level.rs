// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Per-channel arithmetic shared by encode and decode.
//!
//! All operations stay inside `u8`: forced directions saturate and the
//! decode rescale clamps, so no channel ever wraps around.

use rand::Rng;

/// Scale a hidden-channel byte into `[0, depth]` (exact floor of `h / 255 * depth`).
#[inline]
pub fn perturbation(hidden: u8, depth: u8) -> u8 {
    (u32::from(hidden) * u32::from(depth) / 255) as u8
}

/// Scale a source/encoded difference back up to `[0, 255]`
/// (floor of `diff / depth * 255`, clamped).
///
/// `depth` must be non-zero; decode resolves a zero depth before calling.
#[inline]
pub fn rescale(diff: u8, depth: u8) -> u8 {
    debug_assert!(depth > 0);
    (u32::from(diff) * 255 / u32::from(depth)).min(255) as u8
}

/// Offset `source` by `p` in a direction that stays in range.
///
/// Addition that would overflow forces subtraction; subtraction that would
/// underflow forces addition; otherwise the direction is a coin flip.
#[inline]
pub fn perturb<R: Rng + ?Sized>(source: u8, p: u8, rng: &mut R) -> u8 {
    if 255 - p < source {
        return source.saturating_sub(p);
    }
    if p > source {
        return source.saturating_add(p);
    }
    if rng.gen_bool(0.5) {
        source - p
    } else {
        source + p
    }
}
