//! Geometry primitives: [`Point`] and [`Range`].
//!
//! `x` is the column and `y` the row, so a point reads the same way on the
//! terminal and on the search grid.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer point. X grows right (columns), Y grows down (rows).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Create a point from a `(row, col)` pair.
    #[inline]
    pub const fn at(row: i32, col: i32) -> Self {
        Self { x: col, y: row }
    }

    /// Row component (alias for `y`).
    #[inline]
    pub const fn row(self) -> i32 {
        self.y
    }

    /// Column component (alias for `x`).
    #[inline]
    pub const fn col(self) -> i32 {
        self.x
    }

    /// Return a point shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four cardinal neighbours in up, down, left, right order.
    #[inline]
    pub const fn neighbors_4(self) -> [Point; 4] {
        [
            self.shift(0, -1),
            self.shift(0, 1),
            self.shift(-1, 0),
            self.shift(1, 0),
        ]
    }

    /// Whether `other` is one cardinal step away.
    #[inline]
    pub fn is_adjacent(self, other: Point) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Create a range from two corners, canonicalised so that `min` ≤ `max`.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// A range of `size` anchored at the origin.
    #[inline]
    pub fn sized(size: Point) -> Self {
        Self::new(0, 0, size.x.max(0), size.y.max(0))
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Total number of points in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the range has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `p` is inside the half-open range.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Flat row-major index of `p`, or `None` outside the range.
    #[inline]
    pub fn index_of(self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let x = (p.x - self.min.x) as usize;
        let y = (p.y - self.min.y) as usize;
        Some(y * self.width() as usize + x)
    }

    /// Inverse of [`index_of`](Range::index_of).
    #[inline]
    pub fn point_at(self, idx: usize) -> Point {
        let w = self.width().max(1) as usize;
        Point::new((idx % w) as i32 + self.min.x, (idx / w) as i32 + self.min.y)
    }

    /// Row-major iterator over every point in the range.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// RangeIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the points in a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    cur: Point,
}

impl Iterator for RangeIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.range.is_empty() || self.cur.y >= self.range.max.y {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.range.max.x {
            self.cur.x = self.range.min.x;
            self.cur.y += 1;
        }
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.range.is_empty() || self.cur.y >= self.range.max.y {
            return (0, Some(0));
        }
        let w = self.range.width() as usize;
        let full_rows = (self.range.max.y - self.cur.y - 1) as usize;
        let n = full_rows * w + (self.range.max.x - self.cur.x) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_col_aliases() {
        let p = Point::at(3, 7);
        assert_eq!(p, Point::new(7, 3));
        assert_eq!(p.row(), 3);
        assert_eq!(p.col(), 7);
    }

    #[test]
    fn cardinal_neighbors_order() {
        let n = Point::new(2, 2).neighbors_4();
        assert_eq!(
            n,
            [
                Point::new(2, 1),
                Point::new(2, 3),
                Point::new(1, 2),
                Point::new(3, 2)
            ]
        );
        assert!(n.iter().all(|&q| q.is_adjacent(Point::new(2, 2))));
        assert!(!Point::new(0, 0).is_adjacent(Point::new(1, 1)));
    }

    #[test]
    fn range_canonicalises_corners() {
        let r = Range::new(4, 5, 1, 2);
        assert_eq!(r.min, Point::new(1, 2));
        assert_eq!(r.max, Point::new(4, 5));
        assert_eq!(r.len(), 9);
    }

    #[test]
    fn range_iter_is_row_major() {
        let pts: Vec<Point> = Range::new(0, 0, 2, 2).iter().collect();
        assert_eq!(
            pts,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(1, 1)
            ]
        );
        assert_eq!(Range::new(0, 0, 3, 4).iter().len(), 12);
    }

    #[test]
    fn empty_range_iter() {
        assert_eq!(Range::new(2, 2, 2, 5).iter().count(), 0);
        assert!(Range::default().is_empty());
    }

    #[test]
    fn index_round_trip() {
        let r = Range::new(1, 1, 5, 4);
        for p in r {
            let i = r.index_of(p).unwrap();
            assert_eq!(r.point_at(i), p);
        }
        assert_eq!(r.index_of(Point::new(0, 0)), None);
    }
}
