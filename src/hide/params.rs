// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Per-call configuration for encode and decode.
//!
//! Nothing here is process-wide: worker count and randomness are carried
//! by the parameter structs and handed to the pipeline on each call.

use std::num::NonZeroUsize;

/// Depth used when the caller does not pick one.
pub const DEFAULT_DEPTH: u8 = 10;

/// Depth assumed by decode when inference reads a zero difference at the
/// marker pixel.
pub const FALLBACK_DEPTH: u8 = 10;

/// How many row bands the executor may run concurrently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parallelism {
    /// Use the detected hardware concurrency.
    #[default]
    Auto,
    /// Use exactly this many workers.
    Fixed(NonZeroUsize),
}

impl Parallelism {
    /// Build from a plain count; 0 means [`Parallelism::Auto`].
    pub fn from_count(workers: usize) -> Self {
        NonZeroUsize::new(workers).map_or(Self::Auto, Self::Fixed)
    }

    /// Resolve to a concrete worker count (at least 1).
    pub fn workers(&self) -> usize {
        match self {
            Self::Auto => std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            Self::Fixed(n) => n.get(),
        }
    }
}

/// Encode parameters.
///
/// ```rust
/// use phn::hide::EncodeParams;
///
/// let params = EncodeParams::new()
///     .with_depth(24)
///     .with_seed([7u8; 32]);
/// assert_eq!(params.depth(), 24);
/// ```
#[derive(Clone, Debug)]
pub struct EncodeParams {
    depth: u8,
    seed: Option<[u8; 32]>,
    parallelism: Parallelism,
}

impl Default for EncodeParams {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            seed: None,
            parallelism: Parallelism::Auto,
        }
    }
}

impl EncodeParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum per-channel perturbation.
    #[must_use]
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Fixes the tie-break seed. Two encodes with the same seed and inputs
    /// produce identical output regardless of worker count.
    #[must_use]
    pub fn with_seed(mut self, seed: [u8; 32]) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// The fixed seed, if any. `None` draws a fresh one per encode.
    pub fn seed(&self) -> Option<[u8; 32]> {
        self.seed
    }

    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }
}

/// Decode parameters.
#[derive(Clone, Debug, Default)]
pub struct DecodeParams {
    depth: u8,
    parallelism: Parallelism,
}

impl DecodeParams {
    /// Defaults to depth inference from the marker pixel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the depth used to rescale differences; 0 infers it.
    #[must_use]
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_defaults() {
        let p = EncodeParams::default();
        assert_eq!(p.depth(), DEFAULT_DEPTH);
        assert_eq!(p.seed(), None);
        assert_eq!(p.parallelism(), Parallelism::Auto);
    }

    #[test]
    fn decode_defaults_to_inference() {
        assert_eq!(DecodeParams::new().depth(), 0);
    }

    #[test]
    fn parallelism_resolution() {
        assert!(Parallelism::Auto.workers() >= 1);
        assert_eq!(Parallelism::from_count(0), Parallelism::Auto);
        assert_eq!(Parallelism::from_count(3).workers(), 3);
    }
}
