// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Rectangular pixel extents.

/// A rectangle in absolute pixel coordinates: origin plus extent.
///
/// Two buffers are aligned by absolute coordinate, so a buffer whose origin
/// is `(10, 10)` overlaps a `(0, 0)`-origin buffer starting at its own
/// top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Bounds anchored at the origin.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel count.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Exclusive right edge.
    pub fn max_x(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn max_y(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Overlap of two rectangles. Disjoint rectangles yield an empty result
    /// positioned at `self`'s origin.
    pub fn intersect(&self, other: &Bounds) -> Bounds {
        let x0 = i64::from(self.x).max(i64::from(other.x));
        let y0 = i64::from(self.y).max(i64::from(other.y));
        let x1 = self.max_x().min(other.max_x());
        let y1 = self.max_y().min(other.max_y());
        if x1 <= x0 || y1 <= y0 {
            return Bounds::new(self.x, self.y, 0, 0);
        }
        // x0/y0 come from one of the two i32 origins; the extents are bounded by u32 widths.
        Bounds::new(x0 as i32, y0 as i32, (x1 - x0) as u32, (y1 - y0) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_when_either_side_is_zero() {
        assert!(Bounds::from_size(0, 5).is_empty());
        assert!(Bounds::from_size(5, 0).is_empty());
        assert!(!Bounds::from_size(1, 1).is_empty());
    }

    #[test]
    fn intersect_partial_overlap() {
        let a = Bounds::from_size(10, 10);
        let b = Bounds::new(5, -3, 10, 6);
        assert_eq!(a.intersect(&b), Bounds::new(5, 0, 5, 3));
        assert_eq!(b.intersect(&a), Bounds::new(5, 0, 5, 3));
    }

    #[test]
    fn intersect_disjoint_is_empty() {
        let a = Bounds::from_size(4, 4);
        let b = Bounds::new(4, 0, 4, 4);
        assert!(a.intersect(&b).is_empty());
    }

    #[test]
    fn edges_do_not_overflow() {
        let b = Bounds::new(i32::MAX, i32::MAX, u32::MAX, u32::MAX);
        assert_eq!(b.max_x(), i64::from(i32::MAX) + i64::from(u32::MAX));
        assert_eq!(b.area(), u64::from(u32::MAX) * u64::from(u32::MAX));
    }
}
