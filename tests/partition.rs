// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Row band coverage across heights and worker counts.

use std::sync::atomic::{AtomicUsize, Ordering};

use phn::hide::rows::{for_each_band, row_bands};

#[test]
fn bands_cover_all_rows_exactly_once() {
    for height in (0..1000).step_by(7).chain([1, 2, 3, 1023, 4096]) {
        for workers in [0, 1, 2, 3, 4, 6, 8, 12, 16, 31, 64] {
            let bands = row_bands(height, workers);
            let mut hits = vec![0u8; height];
            for band in &bands {
                for y in band.clone() {
                    hits[y] += 1;
                }
            }
            assert!(
                hits.iter().all(|&h| h == 1),
                "height={height} workers={workers} bands={bands:?}"
            );
        }
    }
}

#[test]
fn only_the_top_band_may_be_short() {
    let bands = row_bands(1001, 8);
    let part = 1001 / 8;
    assert_eq!(bands.first().map(|b| b.start), Some(0));
    for band in &bands[1..] {
        assert_eq!(band.len(), part);
    }
    assert!(bands[0].len() <= part);
}

#[test]
fn executor_visits_each_band_once() {
    let height = 333;
    let stride = 4;
    let mut out = vec![0u8; height * stride];
    let calls = AtomicUsize::new(0);
    for_each_band(&mut out, stride, height, 5, |rows, slice| {
        calls.fetch_add(1, Ordering::Relaxed);
        for (i, y) in rows.enumerate() {
            slice[i * stride] = (y % 251) as u8;
        }
    });
    assert_eq!(calls.into_inner(), row_bands(height, 5).len());
    for y in 0..height {
        assert_eq!(out[y * stride], (y % 251) as u8);
    }
}
