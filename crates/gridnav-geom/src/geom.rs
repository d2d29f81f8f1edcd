//! Integer grid primitives: [`Point`] and [`Range`].
//!
//! A `Point` names one cell of a discretized grid; a `Range` is the
//! half-open rectangle of cells a grid covers.

use std::fmt;
use std::ops::Sub;

/// A cell coordinate. X grows right, Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The eight surrounding cells, clockwise starting straight up.
    pub fn neighbors_8(self) -> [Point; 8] {
        const RING: [(i32, i32); 8] = [
            (0, -1),
            (1, -1),
            (1, 0),
            (1, 1),
            (0, 1),
            (-1, 1),
            (-1, 0),
            (-1, -1),
        ];
        RING.map(|(dx, dy)| Self::new(self.x + dx, self.y + dy))
    }

    /// Whether `other` is one of the eight cells around `self`.
    #[inline]
    pub fn is_adjacent(self, other: Point) -> bool {
        let d = other - self;
        d.x.abs().max(d.y.abs()) == 1
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
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

/// Cells `min.x..max.x` by `min.y..max.y`; `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// `width × height` cells anchored at the origin. Negative sizes give
    /// an empty range.
    #[inline]
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            min: Point::new(0, 0),
            max: Point::new(width.max(0), height.max(0)),
        }
    }

    #[inline]
    pub fn width(self) -> i32 {
        (self.max.x - self.min.x).max(0)
    }

    #[inline]
    pub fn height(self) -> i32 {
        (self.max.y - self.min.y).max(0)
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// Every cell, row by row.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            min: self.min,
            width: self.width() as usize,
            next: 0,
            end: self.width() as usize * self.height() as usize,
        }
    }
}

/// Row-major iterator over the cells of a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    min: Point,
    width: usize,
    next: usize,
    end: usize,
}

impl Iterator for RangeIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next >= self.end {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some(Point::new(
            self.min.x + (i % self.width) as i32,
            self.min.y + (i / self.width) as i32,
        ))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency() {
        let p = Point::new(2, 2);
        for n in p.neighbors_8() {
            assert!(p.is_adjacent(n), "{n} should touch {p}");
        }
        assert_eq!(p.neighbors_8()[0], Point::new(2, 1));
        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Point::new(4, 2)));
        assert_eq!(Point::new(3, 4) - Point::new(1, 2), Point::new(2, 2));
    }

    #[test]
    fn containment_is_half_open() {
        let r = Range::with_size(3, 2);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(2, 1)));
        assert!(!r.contains(Point::new(3, 0)));
        assert!(!r.contains(Point::new(0, 2)));
        assert!(!r.contains(Point::new(-1, 0)));
    }

    #[test]
    fn iterates_row_major() {
        let r = Range::with_size(3, 2);
        let mut it = r.iter();
        assert_eq!(it.len(), 6);
        assert_eq!(it.next(), Some(Point::new(0, 0)));
        assert_eq!(it.next(), Some(Point::new(1, 0)));
        assert_eq!(it.len(), 4);
        assert_eq!(it.last(), Some(Point::new(2, 1)));
    }

    #[test]
    fn offset_range_iterates_from_min() {
        let r = Range {
            min: Point::new(-1, 5),
            max: Point::new(1, 7),
        };
        let pts: Vec<_> = r.iter().collect();
        assert_eq!(
            pts,
            [(-1, 5), (0, 5), (-1, 6), (0, 6)].map(|(x, y)| Point::new(x, y))
        );
    }

    #[test]
    fn negative_size_is_empty() {
        let r = Range::with_size(-4, 3);
        assert_eq!((r.width(), r.height()), (0, 3));
        assert_eq!(r.iter().count(), 0);
        assert!(!r.contains(Point::new(0, 0)));
    }
}
