//! The [`Cell`] type: one lattice position with a terrain cost and the
//! state of the current search episode.

use crate::geom::Point;

/// Cost of permanently non-traversable cells such as the border ring.
pub const INFINITE_COST: f64 = f64::INFINITY;

/// Search status of a cell.
///
/// `Unvisited → Visited` happens at most once per episode. `NonTraversable`
/// is decided at generation time and never changes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    #[default]
    Unvisited,
    Visited,
    NonTraversable,
}

/// A single lattice cell.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Point,
    cost: f64,
    status: Status,
    distance: f64,
    prev: Option<Point>,
    is_start: bool,
    is_end: bool,
    reveal: Option<f64>,
}

impl Cell {
    /// Create a cell at `pos`. An infinite `cost` makes it non-traversable.
    pub fn new(pos: Point, cost: f64) -> Self {
        debug_assert!(cost >= 0.0, "invalid cost {cost} at {pos}");
        Self {
            pos,
            cost,
            status: if cost == INFINITE_COST {
                Status::NonTraversable
            } else {
                Status::Unvisited
            },
            distance: f64::INFINITY,
            prev: None,
            is_start: false,
            is_end: false,
            reveal: None,
        }
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.pos.y
    }

    /// Terrain weight. Also used as the elevation in edge costs.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Tentative distance from the start cell, infinite until reached.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Predecessor on the best known path.
    #[inline]
    pub fn prev(&self) -> Option<Point> {
        self.prev
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.is_start
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.is_end
    }

    /// Normalized position along the revealed path, in `[0, 1]`.
    #[inline]
    pub fn reveal(&self) -> Option<f64> {
        self.reveal
    }

    #[inline]
    pub fn is_traversable(&self) -> bool {
        self.status != Status::NonTraversable
    }

    #[inline]
    pub fn is_unvisited(&self) -> bool {
        self.status == Status::Unvisited
    }

    /// Replace the terrain cost. An infinite cost blocks the cell; a
    /// blocked cell stays blocked whatever the new cost.
    pub fn set_cost(&mut self, cost: f64) {
        debug_assert!(cost >= 0.0, "invalid cost {cost} at {}", self.pos);
        self.cost = cost;
        if cost == INFINITE_COST {
            self.status = Status::NonTraversable;
        }
    }

    /// Permanently exclude the cell from the search graph. The cost is kept.
    pub fn block(&mut self) {
        self.status = Status::NonTraversable;
    }

    /// Record a shorter path reaching this cell through `prev`.
    pub fn relax(&mut self, distance: f64, prev: Point) {
        debug_assert!(self.is_unvisited(), "relaxing finalized cell {}", self.pos);
        debug_assert!(prev != self.pos);
        self.distance = distance;
        self.prev = Some(prev);
    }

    /// Finalize the cell for this episode.
    pub fn visit(&mut self) {
        if self.status == Status::Unvisited {
            self.status = Status::Visited;
        }
    }

    /// Designate as the search origin.
    pub fn mark_start(&mut self) {
        self.distance = 0.0;
        self.is_start = true;
    }

    /// Designate as the search target.
    pub fn mark_end(&mut self) {
        self.is_end = true;
    }

    pub fn set_reveal(&mut self, progress: f64) {
        debug_assert!((0.0..=1.0).contains(&progress));
        self.reveal = Some(progress);
    }

    /// Clear search-episode state, keeping cost and non-traversability.
    pub fn reset(&mut self) {
        if self.status == Status::Visited {
            self.status = Status::Unvisited;
        }
        self.distance = f64::INFINITY;
        self.prev = None;
        self.is_start = false;
        self.is_end = false;
        self.reveal = None;
    }
}

#[cfg(test)]
impl Cell {
    /// Overwrite the cost without updating the status, as a corrupted
    /// decode could.
    pub(crate) fn with_cost_unchecked(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinite_cost_is_non_traversable() {
        let c = Cell::new(Point::new(0, 0), INFINITE_COST);
        assert_eq!(c.status(), Status::NonTraversable);
        let c = Cell::new(Point::new(1, 1), 12.0);
        assert_eq!(c.status(), Status::Unvisited);
        assert_eq!(c.distance(), f64::INFINITY);
        assert_eq!(c.prev(), None);
    }

    #[test]
    fn blocked_cell_stays_blocked() {
        let mut c = Cell::new(Point::new(1, 1), 40.0);
        c.block();
        c.set_cost(80.0);
        assert_eq!(c.cost(), 80.0);
        assert_eq!(c.status(), Status::NonTraversable);
        c.visit();
        c.reset();
        assert_eq!(c.status(), Status::NonTraversable);
    }

    #[test]
    fn reset_restores_episode_state() {
        let mut c = Cell::new(Point::new(2, 2), 5.0);
        c.mark_start();
        c.mark_end();
        c.relax(3.0, Point::new(1, 1));
        c.visit();
        c.set_reveal(0.5);
        c.reset();
        assert_eq!(c, Cell::new(Point::new(2, 2), 5.0));
        c.reset();
        assert_eq!(c, Cell::new(Point::new(2, 2), 5.0));
    }

    #[test]
    fn visit_is_one_way() {
        let mut c = Cell::new(Point::new(1, 1), 0.0);
        c.visit();
        assert_eq!(c.status(), Status::Visited);
        c.visit();
        assert_eq!(c.status(), Status::Visited);
    }
}
