use relief_core::Grid;

use crate::cost::length;
use crate::search::{NodeRef, Search, SearchOutcome, Step};

impl Search {
    /// One Dijkstra / A* step: finalize the unvisited cell with the smallest
    /// key and relax its unvisited neighbours.
    ///
    /// Stops as soon as the end cell is finalized, or when no reachable
    /// unvisited cell is left.
    pub(crate) fn step_weighted(&mut self, grid: &mut Grid) -> Step {
        loop {
            let Some(NodeRef { pos, g, .. }) = self.open.pop() else {
                let visited = self.visited;
                return Step::Done(self.finish(SearchOutcome::Unreachable { visited }));
            };

            let Some(current) = grid.at(pos) else {
                continue;
            };
            // Skip stale entries.
            if !current.is_unvisited() || current.distance() != g {
                continue;
            }
            let current_cost = current.cost();

            if pos == self.end {
                if let Some(c) = grid.at_mut(pos) {
                    c.visit();
                }
                self.visited += 1;
                let visited = self.visited;
                return Step::Done(self.finish(SearchOutcome::Reached {
                    distance: g,
                    visited,
                }));
            }

            let mut nb = std::mem::take(&mut self.nb);
            for &np in grid.neighbors_with(&mut nb, pos, 1) {
                let Some(n) = grid.at(np) else {
                    continue;
                };
                if !n.is_unvisited() {
                    continue;
                }
                let tentative = g + length(pos, current_cost, np, n.cost());
                if tentative >= n.distance() {
                    continue;
                }
                let key = self.priority(grid, np, tentative);
                if let Some(n) = grid.at_mut(np) {
                    n.relax(tentative, pos);
                }
                self.open.push(NodeRef {
                    pos: np,
                    key,
                    g: tentative,
                });
            }
            self.nb = nb;

            if let Some(c) = grid.at_mut(pos) {
                c.visit();
            }
            self.visited += 1;
            return Step::Visited(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Algorithm, SearchOutcome, search};
    use relief_core::{Grid, Point, Status};

    #[test]
    fn flat_diagonal_costs_two_sqrt_two() {
        let mut g = Grid::new(3, 3).unwrap();
        g.set_start(Point::new(1, 1)).unwrap();
        g.set_end(Point::new(3, 3)).unwrap();
        let outcome = search(&mut g, Algorithm::Dijkstra).unwrap();
        let SearchOutcome::Reached { distance, .. } = outcome else {
            panic!("expected a path, got {outcome:?}");
        };
        assert!((distance - 2.0 * 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(g.at(Point::new(3, 3)).unwrap().prev(), Some(Point::new(2, 2)));
        assert_eq!(g.at(Point::new(2, 2)).unwrap().prev(), Some(Point::new(1, 1)));
    }

    #[test]
    fn goes_around_a_hill() {
        // a tall ridge in the middle column, except for a pass at the bottom
        let mut g = Grid::from_fn(3, 3, |p| {
            if p.x == 2 && p.y < 3 { 100.0 } else { 0.0 }
        })
        .unwrap();
        g.set_start(Point::new(1, 1)).unwrap();
        g.set_end(Point::new(3, 1)).unwrap();
        let outcome = search(&mut g, Algorithm::Dijkstra).unwrap();
        let SearchOutcome::Reached { distance, .. } = outcome else {
            panic!("expected a path, got {outcome:?}");
        };
        // (1,1) -> (1,2) -> (2,3) -> (3,2) -> (3,1)
        let expected = 1.0 + 2f64.sqrt() + 2f64.sqrt() + 1.0;
        assert!((distance - expected).abs() < 1e-9);
    }

    #[test]
    fn visited_cells_never_relaxed_again() {
        let mut g = Grid::from_fn(7, 5, |p| f64::from((p.x * 7 + p.y * 3) % 11)).unwrap();
        g.set_start(Point::new(1, 1)).unwrap();
        g.set_end(Point::new(7, 5)).unwrap();
        let outcome = search(&mut g, Algorithm::Dijkstra).unwrap();
        assert!(outcome.is_reached());
        // the triangle inequality holds along every finalized edge
        for c in g.interior_cells().filter(|c| c.status() == Status::Visited) {
            for n in g.neighbors(c.pos(), 1) {
                let n = g.at(n).unwrap();
                if n.status() == Status::Visited {
                    assert!(n.distance() <= c.distance() + crate::edge_cost(c, n) + 1e-9);
                }
            }
        }
    }
}
