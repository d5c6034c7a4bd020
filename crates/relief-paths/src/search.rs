use std::collections::{BinaryHeap, VecDeque};
use std::fmt;

use log::debug;
use relief_core::{Grid, Neighbors, Point};

use crate::algorithm::Algorithm;
use crate::control::{CancelToken, SearchObserver};

/// How a search episode ended.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// The end cell was reached at `distance`.
    Reached { distance: f64, visited: usize },
    /// Every reachable cell was exhausted without reaching the end.
    Unreachable { visited: usize },
    /// Stopped from outside before finishing.
    Cancelled { visited: usize },
}

impl SearchOutcome {
    #[inline]
    pub fn is_reached(&self) -> bool {
        matches!(self, Self::Reached { .. })
    }

    /// Number of cells finalized during the episode.
    pub fn visited(&self) -> usize {
        match *self {
            Self::Reached { visited, .. }
            | Self::Unreachable { visited }
            | Self::Cancelled { visited } => visited,
        }
    }
}

/// Result of a single [`Search::step`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Step {
    /// The cell at this position was finalized; more steps may follow.
    Visited(Point),
    /// The search is over. Further steps return the same outcome.
    Done(SearchOutcome),
}

/// Errors preventing a search from starting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The grid has no start or no end cell designated.
    MissingEndpoint,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoint => write!(f, "search needs both a start and an end cell"),
        }
    }
}

impl std::error::Error for SearchError {}

// ---------------------------------------------------------------------------
// Priority-queue entry
// ---------------------------------------------------------------------------

/// Open-set entry. Entries are never updated in place: a relaxed cell is
/// pushed again and the outdated entry is skipped when popped.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeRef {
    pub(crate) pos: Point,
    /// Selection key: distance, plus the estimate for A*.
    pub(crate) key: f64,
    /// Distance the entry was pushed with.
    pub(crate) g: f64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest key first,
        // then the smallest position.
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for NodeRef {}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A resumable search episode over one [`Grid`].
///
/// All state lives in the grid cells (status, distance, predecessor); the
/// `Search` only keeps its frontier. Between two steps the grid is always
/// a valid snapshot of the algorithm's progress.
pub struct Search {
    pub(crate) algorithm: Algorithm,
    pub(crate) start: Point,
    pub(crate) end: Point,
    pub(crate) open: BinaryHeap<NodeRef>,
    pub(crate) queue: VecDeque<Point>,
    pub(crate) nb: Neighbors,
    pub(crate) visited: usize,
    done: Option<SearchOutcome>,
}

impl Search {
    /// Prepare a search from the grid's start cell to its end cell.
    ///
    /// The grid is expected to hold a fresh episode: reset, then endpoints
    /// designated. A non-traversable start or end yields a search that
    /// immediately reports [`SearchOutcome::Unreachable`].
    pub fn new(grid: &Grid, algorithm: Algorithm) -> Result<Self, SearchError> {
        let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
            return Err(SearchError::MissingEndpoint);
        };
        let mut search = Self {
            algorithm,
            start,
            end,
            open: BinaryHeap::new(),
            queue: VecDeque::new(),
            nb: Neighbors::new(),
            visited: 0,
            done: None,
        };

        let traversable = |p| grid.at(p).is_some_and(|c| c.is_traversable());
        if !traversable(start) || !traversable(end) {
            search.done = Some(SearchOutcome::Unreachable { visited: 0 });
            return Ok(search);
        }

        let g = grid.at(start).map_or(0.0, |c| c.distance());
        match algorithm {
            Algorithm::BreadthFirst => search.queue.push_back(start),
            Algorithm::Dijkstra | Algorithm::AStar => {
                let key = search.priority(grid, start, g);
                search.open.push(NodeRef {
                    pos: start,
                    key,
                    g,
                });
            }
        }
        Ok(search)
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The outcome, once the search is over.
    #[inline]
    pub fn outcome(&self) -> Option<SearchOutcome> {
        self.done
    }

    /// Finalize at most one cell.
    pub fn step(&mut self, grid: &mut Grid) -> Step {
        if let Some(outcome) = self.done {
            return Step::Done(outcome);
        }
        match self.algorithm {
            Algorithm::Dijkstra | Algorithm::AStar => self.step_weighted(grid),
            Algorithm::BreadthFirst => self.step_breadth_first(grid),
        }
    }

    /// Stop the search. Cells keep whatever state they reached.
    pub fn cancel(&mut self) -> SearchOutcome {
        match self.done {
            Some(outcome) => outcome,
            None => self.finish(SearchOutcome::Cancelled {
                visited: self.visited,
            }),
        }
    }

    /// Step until the search is over or `cancel` is triggered, reporting
    /// each finalized cell to `observer`.
    pub fn run(
        &mut self,
        grid: &mut Grid,
        cancel: &CancelToken,
        observer: &mut impl SearchObserver,
    ) -> SearchOutcome {
        loop {
            if cancel.is_cancelled() {
                let outcome = self.cancel();
                observer.finished(&outcome);
                return outcome;
            }
            match self.step(grid) {
                Step::Visited(p) => observer.visited(grid, p),
                Step::Done(outcome) => {
                    observer.finished(&outcome);
                    return outcome;
                }
            }
        }
    }

    pub(crate) fn finish(&mut self, outcome: SearchOutcome) -> SearchOutcome {
        debug!(
            "{} search {} -> {}: {:?}",
            self.algorithm, self.start, self.end, outcome
        );
        self.open.clear();
        self.queue.clear();
        self.done = Some(outcome);
        outcome
    }
}

/// Run `algorithm` to completion on `grid` without observation.
pub fn search(grid: &mut Grid, algorithm: Algorithm) -> Result<SearchOutcome, SearchError> {
    let mut s = Search::new(grid, algorithm)?;
    Ok(s.run(grid, &CancelToken::new(), &mut ()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::reconstruct_path;
    use relief_core::Status;

    fn flat(w: i32, h: i32) -> Grid {
        Grid::new(w, h).unwrap()
    }

    #[test]
    fn heap_pops_smallest_key_then_position() {
        let mut heap = BinaryHeap::new();
        for (x, key) in [(3, 2.0), (2, 1.0), (1, 2.0), (4, 1.0)] {
            heap.push(NodeRef {
                pos: Point::new(x, 1),
                key,
                g: key,
            });
        }
        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|n| n.pos.x).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);
    }

    #[test]
    fn missing_endpoint_is_an_error() {
        let mut g = flat(3, 3);
        assert_eq!(
            search(&mut g, Algorithm::Dijkstra),
            Err(SearchError::MissingEndpoint)
        );
        g.set_start(Point::new(1, 1)).unwrap();
        assert!(Search::new(&g, Algorithm::AStar).is_err());
    }

    #[test]
    fn blocked_endpoint_terminates_immediately() {
        for algorithm in Algorithm::ALL {
            let mut g = flat(3, 3);
            g.set_start(Point::new(1, 1)).unwrap();
            g.set_end(Point::new(3, 3)).unwrap();
            g.block(Point::new(3, 3));
            let outcome = search(&mut g, algorithm).unwrap();
            assert_eq!(outcome, SearchOutcome::Unreachable { visited: 0 });
            assert_eq!(g.at(Point::new(3, 3)).unwrap().prev(), None);
        }
    }

    #[test]
    fn corridor_blocked_reports_no_path() {
        for algorithm in Algorithm::ALL {
            // 5-long, 1-wide corridor with its middle cell blocked
            let mut g = flat(5, 1);
            g.set_start(Point::new(1, 1)).unwrap();
            g.set_end(Point::new(5, 1)).unwrap();
            g.block(Point::new(3, 1));
            let outcome = search(&mut g, algorithm).unwrap();
            assert_eq!(outcome, SearchOutcome::Unreachable { visited: 2 });
            assert_eq!(g.at(Point::new(5, 1)).unwrap().prev(), None);
            assert!(reconstruct_path(&g).is_empty());
        }
    }

    #[test]
    fn start_equals_end() {
        for algorithm in Algorithm::ALL {
            let mut g = flat(3, 3);
            g.set_start(Point::new(2, 2)).unwrap();
            g.set_end(Point::new(2, 2)).unwrap();
            let outcome = search(&mut g, algorithm).unwrap();
            assert_eq!(
                outcome,
                SearchOutcome::Reached {
                    distance: 0.0,
                    visited: 1
                }
            );
        }
    }

    #[test]
    fn steps_leave_consistent_snapshots() {
        let mut g = Grid::from_fn(6, 6, |p| f64::from(p.x * p.y)).unwrap();
        g.set_start(Point::new(1, 1)).unwrap();
        g.set_end(Point::new(6, 6)).unwrap();
        let mut s = Search::new(&g, Algorithm::Dijkstra).unwrap();
        let mut last = 0.0;
        while let Step::Visited(p) = s.step(&mut g) {
            let c = g.at(p).unwrap();
            assert_eq!(c.status(), Status::Visited);
            // finalized distances never decrease
            assert!(c.distance() >= last);
            last = c.distance();
            if let Some(prev) = c.prev() {
                assert_eq!(g.at(prev).unwrap().status(), Status::Visited);
                assert!(prev.is_adjacent(p));
            }
        }
        assert!(s.outcome().unwrap().is_reached());
        assert_eq!(s.step(&mut g), Step::Done(s.outcome().unwrap()));
    }

    #[test]
    fn cancelled_search_stops_and_keeps_state() {
        let mut g = flat(8, 8);
        g.set_start(Point::new(1, 1)).unwrap();
        g.set_end(Point::new(8, 8)).unwrap();
        let mut s = Search::new(&g, Algorithm::Dijkstra).unwrap();
        for _ in 0..5 {
            s.step(&mut g);
        }
        let token = CancelToken::new();
        token.cancel();
        let outcome = s.run(&mut g, &token, &mut ());
        assert_eq!(outcome, SearchOutcome::Cancelled { visited: 5 });
        assert_eq!(
            g.cells().filter(|c| c.status() == Status::Visited).count(),
            5
        );
        assert_eq!(g.at(Point::new(8, 8)).unwrap().prev(), None);
        assert_eq!(s.cancel(), outcome);
    }

    #[test]
    fn observer_sees_every_visit() {
        struct Count(usize, Option<SearchOutcome>);
        impl SearchObserver for Count {
            fn visited(&mut self, grid: &Grid, p: Point) {
                assert_eq!(grid.at(p).unwrap().status(), Status::Visited);
                self.0 += 1;
            }
            fn finished(&mut self, outcome: &SearchOutcome) {
                self.1 = Some(*outcome);
            }
        }

        let mut g = flat(5, 5);
        g.set_start(Point::new(1, 3)).unwrap();
        g.set_end(Point::new(5, 3)).unwrap();
        let mut count = Count(0, None);
        let outcome = Search::new(&g, Algorithm::AStar)
            .unwrap()
            .run(&mut g, &CancelToken::new(), &mut count);
        // the end cell is finalized by the last step, which reports Done
        assert_eq!(count.0 + 1, outcome.visited());
        assert_eq!(count.1, Some(outcome));
    }
}
