//! Lattice coordinates and rectangles.
//!
//! X grows right and Y grows down, the same way pixels do when a click is
//! translated into a cell.

use std::fmt;

/// A lattice position.
///
/// Points order lexicographically by `(x, y)` (field order matters for
/// the derived `Ord`); the search uses that order to break ties.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
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

    /// Whether `other` is one of the eight cells touching `self`.
    pub fn is_adjacent(self, other: Point) -> bool {
        let (dx, dy) = ((self.x - other.x).abs(), (self.y - other.y).abs());
        self != other && dx <= 1 && dy <= 1
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle of points, `min` inclusive and `max` exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    #[inline]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// The square of side `2 * radius + 1` centred on `p`.
    pub fn around(p: Point, radius: i32) -> Self {
        Self::new(p.x - radius, p.y - radius, p.x + radius + 1, p.y + radius + 1)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Number of points inside.
    pub fn len(self) -> usize {
        if self.is_empty() {
            0
        } else {
            ((self.max.x - self.min.x) * (self.max.y - self.min.y)) as usize
        }
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// Overlap of both rectangles; empty when they do not meet.
    pub fn intersect(self, other: Range) -> Self {
        Self::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
        )
    }

    /// Every point inside, row by row.
    pub fn points(self) -> impl Iterator<Item = Point> {
        let (xs, ys) = (self.min.x..self.max.x, self.min.y..self.max.y);
        ys.flat_map(move |y| xs.clone().map(move |x| Point::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_x_then_y() {
        assert!(Point::new(1, 9) < Point::new(2, 0));
        assert!(Point::new(2, 0) < Point::new(2, 1));
    }

    #[test]
    fn eight_neighbours_are_adjacent() {
        let p = Point::new(5, 5);
        assert!(p.is_adjacent(Point::new(6, 6)));
        assert!(p.is_adjacent(Point::new(5, 4)));
        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Point::new(7, 5)));
    }

    #[test]
    fn points_are_row_major() {
        let r = Range::new(0, 0, 3, 2);
        let pts: Vec<_> = r.points().collect();
        assert_eq!(pts.len(), r.len());
        assert_eq!(pts[1], Point::new(1, 0));
        assert_eq!(pts[3], Point::new(0, 1));
        assert!(r.contains(Point::new(2, 1)));
        assert!(!r.contains(Point::new(3, 1)));
    }

    #[test]
    fn around_clipped_to_bounds() {
        let sq = Range::around(Point::new(1, 1), 2);
        assert_eq!(sq, Range::new(-1, -1, 4, 4));
        assert_eq!(sq.intersect(Range::new(1, 1, 10, 10)), Range::new(1, 1, 4, 4));
        let apart = Range::new(0, 0, 1, 1).intersect(Range::new(2, 2, 3, 3));
        assert!(apart.is_empty());
        assert_eq!(apart.len(), 0);
        assert_eq!(apart.points().count(), 0);
    }
}
