use crate::geom::{Point, Range};

/// Scratch buffer for neighbour queries, reused across calls so the hot
/// search loop does not allocate.
///
/// Enumerates the lattice positions within a Chebyshev radius of a point,
/// the point itself excluded, clipped to a bounding range. Radius 1 gives
/// 8-connectivity.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the positions within `radius` of `p` that lie in `bounds`.
    pub fn within(&mut self, bounds: Range, p: Point, radius: i32) -> &[Point] {
        self.buf.clear();
        for n in Range::around(p, radius).intersect(bounds).points() {
            if n != p {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_one_gives_eight() {
        let mut nb = Neighbors::new();
        let bounds = Range::new(1, 1, 10, 10);
        let ns = nb.within(bounds, Point::new(5, 5), 1);
        assert_eq!(ns.len(), 8);
        assert!(ns.iter().all(|n| n.is_adjacent(Point::new(5, 5))));
    }

    #[test]
    fn clipped_at_bounds() {
        let mut nb = Neighbors::new();
        let bounds = Range::new(1, 1, 10, 10);
        assert_eq!(nb.within(bounds, Point::new(1, 1), 1).len(), 3);
        assert_eq!(nb.within(bounds, Point::new(1, 1), 2).len(), 8);
        assert_eq!(nb.within(bounds, Point::new(5, 5), 2).len(), 24);
    }
}
