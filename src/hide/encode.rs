// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Encoder: perturb each source channel by a bounded offset derived from
//! the hidden image, then stamp the depth into the marker pixel.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::raster::{PixelBuffer, CHANNELS};

use super::level::{perturb, perturbation};
use super::params::EncodeParams;
use super::rows::for_each_band;

/// Hidden-channel value that yields a perturbation of exactly `depth`.
const MARKER_HIDDEN: u8 = 255;

/// Tie-break generator for one row.
///
/// Every row draws from its own ChaCha stream of the same seed, so output
/// does not depend on how rows are grouped into bands.
fn row_rng(seed: &[u8; 32], y: usize) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::from_seed(*seed);
    rng.set_stream(y as u64);
    rng
}

fn fresh_seed() -> [u8; 32] {
    let mut seed = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut seed);
    seed
}

/// Hide `hidden` inside `source` with the given depth.
///
/// Uses detected parallelism and a fresh random seed. The result has
/// `source`'s bounds; `hidden` is cropped or zero-extended to match.
pub fn encode(source: &PixelBuffer, hidden: &PixelBuffer, depth: u8) -> PixelBuffer {
    encode_with(source, hidden, &EncodeParams::new().with_depth(depth))
}

/// Hide `hidden` inside `source` using explicit parameters.
///
/// R, G and B of every pixel become `source ± level(hidden, depth)`;
/// alpha is copied from `source`. The red channel of the bottom-right
/// pixel is then re-encoded with a full-scale hidden value, so it differs
/// from the source by exactly `depth` (for depths up to 127).
pub fn encode_with(
    source: &PixelBuffer,
    hidden: &PixelBuffer,
    params: &EncodeParams,
) -> PixelBuffer {
    if source.is_empty() {
        return source.clone();
    }

    let depth = params.depth();
    let seed = params.seed().unwrap_or_else(fresh_seed);
    let hid = hidden.aligned_to(source);
    let mut dst = source.blank();

    let width = source.width() as usize;
    let height = source.height() as usize;
    let stride = source.stride();
    let workers = params.parallelism().workers();
    log::debug!("encode {width}x{height} depth={depth} workers={workers}");

    let src_pix = source.as_raw();
    let hid_pix = hid.as_raw();
    for_each_band(dst.as_raw_mut(), stride, height, workers, |rows, out| {
        for (i, y) in rows.enumerate() {
            let mut rng = row_rng(&seed, y);
            let src_row = &src_pix[y * stride..(y + 1) * stride];
            let hid_row = &hid_pix[y * stride..(y + 1) * stride];
            let out_row = &mut out[i * stride..(i + 1) * stride];

            let pixels = out_row
                .chunks_exact_mut(CHANNELS)
                .zip(src_row.chunks_exact(CHANNELS))
                .zip(hid_row.chunks_exact(CHANNELS));
            for ((d, s), h) in pixels {
                for c in 0..3 {
                    d[c] = perturb(s[c], perturbation(h[c], depth), &mut rng);
                }
                d[3] = s[3];
            }
        }
    });

    // Depth marker. Its coin flip draws from the stream after the last row.
    let pos = source.offset(width - 1, height - 1);
    let mut rng = row_rng(&seed, height);
    dst.as_raw_mut()[pos] = perturb(src_pix[pos], perturbation(MARKER_HIDDEN, depth), &mut rng);

    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hide::params::Parallelism;
    use crate::raster::Bounds;
    use std::num::NonZeroUsize;

    fn gray(width: u32, height: u32, v: u8) -> PixelBuffer {
        PixelBuffer::uniform(Bounds::from_size(width, height), [v, v, v, 255]).unwrap()
    }

    fn noise(width: u32, height: u32, salt: u32) -> PixelBuffer {
        let mut pix = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let v = x.wrapping_mul(31) ^ y.wrapping_mul(17) ^ salt;
                pix.extend_from_slice(&[v as u8, (v >> 3) as u8, (v >> 5) as u8, (x * 7) as u8]);
            }
        }
        PixelBuffer::from_raw(width, height, pix).unwrap()
    }

    fn fixed(workers: usize) -> Parallelism {
        Parallelism::Fixed(NonZeroUsize::new(workers).unwrap())
    }

    #[test]
    fn empty_source_gives_empty_output() {
        let src = PixelBuffer::new(Bounds::from_size(0, 0)).unwrap();
        let out = encode(&src, &gray(4, 4, 255), 10);
        assert!(out.is_empty());
        assert!(out.as_raw().is_empty());
    }

    #[test]
    fn zero_height_source_gives_empty_output() {
        let src = PixelBuffer::new(Bounds::from_size(8, 0)).unwrap();
        let out = encode(&src, &gray(8, 8, 255), 10);
        assert_eq!(out.bounds(), src.bounds());
        assert!(out.as_raw().is_empty());
    }

    #[test]
    fn offsets_are_exactly_depth_for_white_hidden() {
        let src = gray(2, 2, 128);
        let out = encode(&src, &gray(2, 2, 255), 10);
        for y in 0..2 {
            for x in 0..2 {
                let px = out.pixel(x, y).unwrap();
                for c in 0..3 {
                    assert!(px[c] == 118 || px[c] == 138, "({x},{y}) channel {c} = {}", px[c]);
                }
                assert_eq!(px[3], 255);
            }
        }
    }

    #[test]
    fn black_hidden_leaves_source_untouched_except_marker() {
        let src = noise(9, 7, 3);
        let out = encode(&src, &gray(9, 7, 0), 20);
        for y in 0..7 {
            for x in 0..9 {
                let (s, o) = (src.pixel(x, y).unwrap(), out.pixel(x, y).unwrap());
                if (x, y) == (8, 6) {
                    assert_eq!(s[0].abs_diff(o[0]), 20);
                    assert_eq!(&s[1..], &o[1..]);
                } else {
                    assert_eq!(s, o);
                }
            }
        }
    }

    #[test]
    fn alpha_is_copied_from_source() {
        let src = noise(16, 12, 1);
        let hid = noise(16, 12, 99);
        let out = encode(&src, &hid, 30);
        for (s, o) in src.as_raw().chunks_exact(4).zip(out.as_raw().chunks_exact(4)) {
            assert_eq!(s[3], o[3]);
        }
    }

    #[test]
    fn same_seed_is_reproducible_across_worker_counts() {
        let src = noise(40, 90, 5);
        let hid = noise(40, 90, 77);
        let base = EncodeParams::new().with_depth(12).with_seed([7u8; 32]);
        let a = encode_with(&src, &hid, &base.clone().with_parallelism(fixed(1)));
        let b = encode_with(&src, &hid, &base.clone().with_parallelism(fixed(3)));
        let c = encode_with(&src, &hid, &base.with_parallelism(fixed(8)));
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn different_seeds_differ() {
        let src = gray(32, 32, 128);
        let hid = gray(32, 32, 255);
        let a = encode_with(&src, &hid, &EncodeParams::new().with_seed([1u8; 32]));
        let b = encode_with(&src, &hid, &EncodeParams::new().with_seed([2u8; 32]));
        assert_ne!(a, b);
    }

    #[test]
    fn output_keeps_source_bounds_when_hidden_differs() {
        let src = noise(10, 6, 0).with_origin(3, 4);
        let hid = noise(4, 20, 1);
        let out = encode(&src, &hid, 10);
        assert_eq!(out.bounds(), src.bounds());
    }

    #[test]
    fn single_pixel_image_is_marker_only() {
        let src = gray(1, 1, 100);
        let out = encode(&src, &gray(1, 1, 0), 10);
        let px = out.pixel(0, 0).unwrap();
        assert_eq!(px[0].abs_diff(100), 10);
        assert_eq!(&px[1..], &[100, 100, 255]);
    }
}
