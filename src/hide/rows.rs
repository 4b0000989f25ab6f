// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Row-partitioned fork-join execution.
//!
//! The image height is cut into contiguous bands of `height / workers`
//! rows, walking backward from the bottom so that only the topmost band
//! can be short. Each band gets its own disjoint slice of the output
//! buffer, one task is spawned per band, and the call returns only after
//! every band has finished. Small images (fewer rows per band than
//! workers) run as a single band on the calling thread.
//!
//! With the `parallel` feature the bands run inside a `rayon::scope`;
//! without it they run one after another.

use std::ops::Range;

/// Split `[0, height)` into bands for `workers` workers.
///
/// Bands are returned in ascending order, are pairwise disjoint, and
/// cover every row exactly once.
pub fn row_bands(height: usize, workers: usize) -> Vec<Range<usize>> {
    let part = if workers == 0 { 0 } else { height / workers };
    if workers <= 1 || part < workers {
        return vec![0..height];
    }

    let mut bands = Vec::with_capacity(height / part + 1);
    let mut end = height;
    while end > 0 {
        let start = end.saturating_sub(part);
        bands.push(start..end);
        end = start;
    }
    bands.reverse();
    bands
}

/// Run `f(rows, out_rows)` over every band of `out`.
///
/// `out` holds `height` rows of `stride` bytes; `out_rows` is the slice
/// covering exactly `rows`, so workers never share an output byte.
pub fn for_each_band<F>(out: &mut [u8], stride: usize, height: usize, workers: usize, f: F)
where
    F: Fn(Range<usize>, &mut [u8]) + Sync,
{
    debug_assert_eq!(out.len(), stride * height);

    let bands = row_bands(height, workers);
    if bands.len() == 1 {
        f(0..height, out);
        return;
    }
    log::debug!("dispatching {} row bands for {height} rows", bands.len());

    let mut jobs = Vec::with_capacity(bands.len());
    let mut rest: &mut [u8] = out;
    for band in bands {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(band.len() * stride);
        jobs.push((band, head));
        rest = tail;
    }

    #[cfg(feature = "parallel")]
    {
        let f = &f;
        rayon::scope(|s| {
            for (band, rows) in jobs {
                s.spawn(move |_| {
                    log::trace!("band {band:?}");
                    f(band, rows)
                });
            }
        });
    }

    #[cfg(not(feature = "parallel"))]
    for (band, rows) in jobs {
        log::trace!("band {band:?}");
        f(band, rows);
    }
}
