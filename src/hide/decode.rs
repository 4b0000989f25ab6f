// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Decoder: recover an approximation of the hidden image from the
//! per-channel absolute difference between encoded output and source.

use crate::raster::{PixelBuffer, CHANNELS};

use super::level::rescale;
use super::params::{DecodeParams, FALLBACK_DEPTH};
use super::rows::for_each_band;

/// Read the encode depth back from the marker pixel.
///
/// Returns `|source_red - encoded_red|` at the bottom-right pixel of
/// `encoded`, or [`FALLBACK_DEPTH`] when that difference is zero or the
/// image is empty. `source` is compared after alignment to `encoded`.
pub fn infer_depth(encoded: &PixelBuffer, source: &PixelBuffer) -> u8 {
    if encoded.is_empty() {
        return FALLBACK_DEPTH;
    }
    let src = source.aligned_to(encoded);
    marker_depth(encoded, &src)
}

fn marker_depth(encoded: &PixelBuffer, aligned_source: &PixelBuffer) -> u8 {
    let pos = encoded.offset(encoded.width() as usize - 1, encoded.height() as usize - 1);
    let depth = aligned_source.as_raw()[pos].abs_diff(encoded.as_raw()[pos]);
    if depth == 0 {
        log::warn!("marker pixel carries no depth, assuming {FALLBACK_DEPTH}");
        return FALLBACK_DEPTH;
    }
    depth
}

/// Recover the hidden image from `encoded` and the original `source`.
///
/// `depth == 0` infers the depth from the marker pixel. The result has
/// `encoded`'s bounds; `source` is cropped or zero-extended to match.
pub fn decode(encoded: &PixelBuffer, source: &PixelBuffer, depth: u8) -> PixelBuffer {
    decode_with(encoded, source, &DecodeParams::new().with_depth(depth))
}

/// Recover the hidden image using explicit parameters.
///
/// Each of R, G, B becomes `min(|source - encoded| * 255 / depth, 255)`;
/// alpha is copied from the aligned source.
pub fn decode_with(
    encoded: &PixelBuffer,
    source: &PixelBuffer,
    params: &DecodeParams,
) -> PixelBuffer {
    if encoded.is_empty() {
        return encoded.clone();
    }

    let src = source.aligned_to(encoded);
    let depth = match params.depth() {
        0 => marker_depth(encoded, &src),
        d => d,
    };
    let mut dst = encoded.blank();

    let height = encoded.height() as usize;
    let stride = encoded.stride();
    let workers = params.parallelism().workers();
    log::debug!(
        "decode {}x{height} depth={depth} (requested {}) workers={workers}",
        encoded.width(),
        params.depth()
    );

    let enc_pix = encoded.as_raw();
    let src_pix = src.as_raw();
    for_each_band(dst.as_raw_mut(), stride, height, workers, |rows, out| {
        let start = rows.start * stride;
        let end = rows.end * stride;
        let pixels = out
            .chunks_exact_mut(CHANNELS)
            .zip(enc_pix[start..end].chunks_exact(CHANNELS))
            .zip(src_pix[start..end].chunks_exact(CHANNELS));
        for ((d, e), s) in pixels {
            for c in 0..3 {
                d[c] = rescale(s[c].abs_diff(e[c]), depth);
            }
            d[3] = s[3];
        }
    });

    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Bounds;

    fn px(width: u32, height: u32, rgba: [u8; 4]) -> PixelBuffer {
        PixelBuffer::uniform(Bounds::from_size(width, height), rgba).unwrap()
    }

    #[test]
    fn empty_encoded_gives_empty_output() {
        let enc = PixelBuffer::new(Bounds::from_size(0, 0)).unwrap();
        let out = decode(&enc, &px(3, 3, [1, 2, 3, 4]), 0);
        assert!(out.is_empty());
        assert_eq!(infer_depth(&enc, &enc), FALLBACK_DEPTH);
    }

    #[test]
    fn full_depth_difference_maps_to_white() {
        let src = px(3, 2, [128, 128, 128, 200]);
        let enc = px(3, 2, [138, 118, 138, 9]);
        let out = decode(&enc, &src, 10);
        for p in out.as_raw().chunks_exact(4) {
            assert_eq!(p, [255, 255, 255, 200]);
        }
    }

    #[test]
    fn identical_images_decode_to_black() {
        let src = px(4, 4, [50, 60, 70, 255]);
        let out = decode(&src, &src, 10);
        for p in out.as_raw().chunks_exact(4) {
            assert_eq!(p, [0, 0, 0, 255]);
        }
    }

    #[test]
    fn oversized_difference_clamps() {
        let src = px(1, 1, [0, 0, 0, 255]);
        let enc = px(1, 1, [200, 11, 5, 255]);
        let out = decode(&enc, &src, 10);
        assert_eq!(out.pixel(0, 0), Some([255, 255, 127, 255]));
    }

    #[test]
    fn depth_inferred_from_marker() {
        let src = px(3, 3, [100, 100, 100, 255]);
        let mut enc = src.clone();
        enc.set_pixel(2, 2, [117, 100, 100, 255]);
        assert_eq!(infer_depth(&enc, &src), 17);

        // The marker itself rescales to full scale under the inferred depth.
        let out = decode(&enc, &src, 0);
        assert_eq!(out.pixel(2, 2), Some([255, 0, 0, 255]));
    }

    #[test]
    fn zero_marker_difference_falls_back() {
        let src = px(2, 2, [100, 100, 100, 255]);
        let mut enc = px(2, 2, [105, 100, 100, 255]);
        enc.set_pixel(1, 1, [100, 100, 100, 255]);
        assert_eq!(infer_depth(&enc, &src), FALLBACK_DEPTH);
        let out = decode(&enc, &src, 0);
        // 5 / 10 * 255
        assert_eq!(out.pixel(0, 0), Some([127, 0, 0, 255]));
    }

    #[test]
    fn output_takes_encoded_bounds() {
        let enc = px(5, 3, [10, 10, 10, 255]).with_origin(-2, 7);
        let src = px(2, 2, [10, 10, 10, 255]);
        let out = decode(&enc, &src, 10);
        assert_eq!(out.bounds(), enc.bounds());
    }

    #[test]
    fn missing_source_area_reads_as_zero() {
        let enc = px(2, 1, [20, 20, 20, 255]);
        let src = px(1, 1, [20, 20, 20, 255]);
        let out = decode(&enc, &src, 20);
        assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 255]));
        // Zero-extended source: diff 20 at full scale, alpha from the zero fill.
        assert_eq!(out.pixel(1, 0), Some([255, 255, 255, 0]));
    }
}
