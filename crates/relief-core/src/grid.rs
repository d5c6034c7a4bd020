//! The [`Grid`] type: an arena of [`Cell`]s surrounded by a border ring.
//!
//! A grid of interior size `width × height` physically stores
//! `(width + 2) × (height + 2)` cells. The outer ring has infinite cost and
//! is never traversable, so every interior cell has a full set of eight
//! lattice neighbours. Cells refer to each other by [`Point`], never by
//! pointer.

use crate::cell::{Cell, INFINITE_COST, Status};
use crate::error::GridError;
use crate::geom::{Point, Range};
use crate::neighbors::Neighbors;

/// Result of [`Grid::designate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Designation {
    Start(Point),
    End(Point),
    /// Both endpoints were already set; nothing changed.
    Ignored,
}

/// Largest number of stored cells (border included) a grid may have.
pub const MAX_CELLS: usize = 1 << 22;

/// Whether a `width × height` interior plus its border fits in
/// [`MAX_CELLS`] without overflowing the `i32` index arithmetic.
fn dimensions_fit(width: i32, height: i32) -> bool {
    if width <= 0 || height <= 0 {
        return false;
    }
    let (Some(w), Some(h)) = (width.checked_add(2), height.checked_add(2)) else {
        return false;
    };
    w.checked_mul(h).is_some_and(|n| n as usize <= MAX_CELLS)
}

/// A rectangular lattice of cells with a non-traversable border ring.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    cells: Vec<Cell>,
    width: i32,
    height: i32,
    start: Option<Point>,
    end: Option<Point>,
}

impl Grid {
    /// Create a grid whose interior cells all cost 0.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        Self::from_fn(width, height, |_| 0.0)
    }

    /// Create a grid, computing each interior cost with `cost`.
    ///
    /// `cost` is called once per interior cell in row-major order.
    pub fn from_fn(
        width: i32,
        height: i32,
        mut cost: impl FnMut(Point) -> f64,
    ) -> Result<Self, GridError> {
        if !dimensions_fit(width, height) {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let bounds = Range::new(0, 0, width + 2, height + 2);
        let interior = Range::new(1, 1, width + 1, height + 1);
        let cells = bounds
            .points()
            .map(|p| {
                if interior.contains(p) {
                    Cell::new(p, cost(p))
                } else {
                    Cell::new(p, INFINITE_COST)
                }
            })
            .collect();
        Ok(Self {
            cells,
            width,
            height,
            start: None,
            end: None,
        })
    }

    /// Interior width (border excluded).
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Interior height (border excluded).
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Every stored position, border ring included.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width + 2, self.height + 2)
    }

    /// The addressable interior `(1..=width) × (1..=height)`.
    #[inline]
    pub fn interior(&self) -> Range {
        Range::new(1, 1, self.width + 1, self.height + 1)
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds().contains(p) {
            return None;
        }
        Some((p.y * (self.width + 2) + p.x) as usize)
    }

    /// The cell at `p`, border included. `None` outside the stored lattice.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// Mutable access to the cell at `p`.
    #[inline]
    pub fn at_mut(&mut self, p: Point) -> Option<&mut Cell> {
        self.idx(p).map(|i| &mut self.cells[i])
    }

    /// All stored cells in row-major order, border included.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Interior cells in row-major order.
    pub fn interior_cells(&self) -> impl Iterator<Item = &Cell> {
        let interior = self.interior();
        self.cells.iter().filter(move |c| interior.contains(c.pos()))
    }

    /// Replace the cost of the cell at `p`. No-op outside the lattice.
    pub fn set_cost(&mut self, p: Point, cost: f64) {
        if let Some(c) = self.at_mut(p) {
            c.set_cost(cost);
        }
    }

    /// Permanently exclude the cell at `p` from searches.
    pub fn block(&mut self, p: Point) {
        if let Some(c) = self.at_mut(p) {
            c.block();
        }
    }

    /// Whether the grid is internally consistent:
    ///
    /// - one cell per position, stored in row-major order, border ring blocked;
    /// - costs are non-negative, and infinite ones are non-traversable;
    /// - the start and end flags are set on exactly the designated cells;
    /// - every predecessor is an adjacent interior cell strictly closer to
    ///   the start, so predecessor chains cannot loop.
    ///
    /// Always true for grids built by this crate; decoded grids may not be.
    pub fn is_well_formed(&self) -> bool {
        if !dimensions_fit(self.width, self.height) {
            return false;
        }
        let bounds = self.bounds();
        let interior = self.interior();
        if self.cells.len() != bounds.len()
            || [self.start, self.end]
                .into_iter()
                .flatten()
                .any(|p| !interior.contains(p))
        {
            return false;
        }
        self.cells.iter().zip(bounds.points()).all(|(c, p)| {
            c.pos() == p
                && (interior.contains(p) || !c.is_traversable())
                && c.cost() >= 0.0
                && (c.cost() != INFINITE_COST || !c.is_traversable())
                && c.is_start() == (self.start == Some(p))
                && c.is_end() == (self.end == Some(p))
                && c.reveal().is_none_or(|t| (0.0..=1.0).contains(&t))
                && c.prev().is_none_or(|q| {
                    interior.contains(q)
                        && q.is_adjacent(p)
                        && self.at(q).is_some_and(|prev| prev.distance() < c.distance())
                })
        })
    }

    /// Number of non-traversable interior cells.
    pub fn blocked_count(&self) -> usize {
        self.interior_cells().filter(|c| !c.is_traversable()).count()
    }

    /// Interior positions within Chebyshev `radius` of `p`, `p` excluded.
    ///
    /// Traversability is not filtered; callers decide.
    pub fn neighbors(&self, p: Point, radius: i32) -> Vec<Point> {
        let mut nb = Neighbors::new();
        nb.within(self.interior(), p, radius).to_vec()
    }

    /// Like [`neighbors`](Self::neighbors), reusing a [`Neighbors`] buffer.
    pub fn neighbors_with<'a>(&self, nb: &'a mut Neighbors, p: Point, radius: i32) -> &'a [Point] {
        nb.within(self.interior(), p, radius)
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    fn endpoint_cell(&mut self, p: Point) -> Result<&mut Cell, GridError> {
        let interior = self.interior();
        match self.at_mut(p) {
            Some(c) if interior.contains(p) && c.is_traversable() => Ok(c),
            _ => Err(GridError::InvalidEndpoint(p)),
        }
    }

    /// Designate `p` as the search origin, replacing any previous start.
    pub fn set_start(&mut self, p: Point) -> Result<(), GridError> {
        self.endpoint_cell(p)?.mark_start();
        if let Some(old) = self.start.replace(p).filter(|&old| old != p) {
            if let Some(c) = self.at_mut(old) {
                let is_end = c.is_end();
                c.reset();
                if is_end {
                    c.mark_end();
                }
            }
        }
        Ok(())
    }

    /// Designate `p` as the search target, replacing any previous end.
    pub fn set_end(&mut self, p: Point) -> Result<(), GridError> {
        self.endpoint_cell(p)?.mark_end();
        if let Some(old) = self.end.replace(p).filter(|&old| old != p) {
            if let Some(c) = self.at_mut(old) {
                let is_start = c.is_start();
                c.reset();
                if is_start {
                    c.mark_start();
                }
            }
        }
        Ok(())
    }

    /// Designate the start on the first call, the end on the second, and
    /// ignore later calls.
    ///
    /// A non-traversable or out-of-interior `p` is rejected without any
    /// state change.
    pub fn designate(&mut self, p: Point) -> Result<Designation, GridError> {
        if self.start.is_some() && self.end.is_some() {
            return Ok(Designation::Ignored);
        }
        self.endpoint_cell(p)?;
        if self.start.is_none() {
            self.set_start(p)?;
            Ok(Designation::Start(p))
        } else {
            self.set_end(p)?;
            Ok(Designation::End(p))
        }
    }

    /// Clear the search episode: statuses, distances, predecessors,
    /// endpoints and reveal progress. Costs are untouched.
    pub fn reset(&mut self) {
        self.start = None;
        self.end = None;
        for c in self.cells.iter_mut() {
            c.reset();
        }
    }

    /// Whether any cell was finalized since the last reset.
    pub fn has_search_state(&self) -> bool {
        self.cells
            .iter()
            .any(|c| c.status() == Status::Visited || c.prev().is_some() || c.reveal().is_some())
    }

    /// Feed every visible (interior) cell to a render callback.
    ///
    /// The callback derives colors from `status`, `is_start`, `is_end`,
    /// `reveal` and `cost`; the grid computes none itself.
    pub fn render(&self, mut f: impl FnMut(&Cell)) {
        for c in self.interior_cells() {
            f(c);
        }
    }
}
