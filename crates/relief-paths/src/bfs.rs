use relief_core::Grid;

use crate::cost::length;
use crate::search::{Search, SearchOutcome, Step};

impl Search {
    /// One breadth-first step: dequeue a cell, discover its unvisited
    /// neighbours and finalize it.
    ///
    /// Edge weights do not affect the order; `distance` only accumulates
    /// the weighted length of the hop path for display. A cell gets its
    /// predecessor when first discovered and is queued once, so the path
    /// found has the fewest hops. The search stops when the end cell is
    /// dequeued.
    pub(crate) fn step_breadth_first(&mut self, grid: &mut Grid) -> Step {
        let Some(pos) = self.queue.pop_front() else {
            let visited = self.visited;
            return Step::Done(self.finish(SearchOutcome::Unreachable { visited }));
        };
        let Some(current) = grid.at(pos) else {
            return Step::Visited(pos);
        };
        let (current_cost, current_dist) = (current.cost(), current.distance());

        if pos == self.end {
            if let Some(c) = grid.at_mut(pos) {
                c.visit();
            }
            self.visited += 1;
            let visited = self.visited;
            return Step::Done(self.finish(SearchOutcome::Reached {
                distance: current_dist,
                visited,
            }));
        }

        let mut nb = std::mem::take(&mut self.nb);
        for &np in grid.neighbors_with(&mut nb, pos, 1) {
            let Some(n) = grid.at(np) else {
                continue;
            };
            // Already discovered (the start has distance 0).
            if !n.is_unvisited() || n.distance().is_finite() {
                continue;
            }
            let d = current_dist + length(pos, current_cost, np, n.cost());
            if let Some(n) = grid.at_mut(np) {
                n.relax(d, pos);
            }
            self.queue.push_back(np);
        }
        self.nb = nb;

        if let Some(c) = grid.at_mut(pos) {
            c.visit();
        }
        self.visited += 1;
        Step::Visited(pos)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Algorithm, SearchOutcome, reconstruct_path, search};
    use relief_core::{Grid, Point};

    #[test]
    fn fewest_hops_even_over_hills() {
        // the straight line climbs a hill; Dijkstra would go around it
        let mut g = Grid::from_fn(5, 3, |p| if p.x == 3 && p.y == 2 { 50.0 } else { 0.0 }).unwrap();
        g.set_start(Point::new(1, 2)).unwrap();
        g.set_end(Point::new(5, 2)).unwrap();
        let mut d = g.clone();

        assert!(search(&mut g, Algorithm::BreadthFirst).unwrap().is_reached());
        let hops = reconstruct_path(&g).len() - 1;
        assert_eq!(hops, 4);

        let SearchOutcome::Reached { distance: weighted, .. } =
            search(&mut d, Algorithm::Dijkstra).unwrap()
        else {
            panic!("dijkstra should reach the end");
        };
        let bfs_distance = g.at(Point::new(5, 2)).unwrap().distance();
        assert!(weighted <= bfs_distance);
    }

    #[test]
    fn uniform_terrain_matches_dijkstra_on_straight_line() {
        let mut b = Grid::from_fn(6, 1, |_| 7.0).unwrap();
        b.set_start(Point::new(1, 1)).unwrap();
        b.set_end(Point::new(6, 1)).unwrap();
        let mut d = b.clone();
        let ob = search(&mut b, Algorithm::BreadthFirst).unwrap();
        let od = search(&mut d, Algorithm::Dijkstra).unwrap();
        assert_eq!(
            ob,
            SearchOutcome::Reached {
                distance: 5.0,
                visited: 6
            }
        );
        let SearchOutcome::Reached { distance, .. } = od else {
            panic!("dijkstra should reach the end");
        };
        assert_eq!(distance, 5.0);
    }

    #[test]
    fn each_cell_queued_once() {
        let mut g = Grid::new(6, 6).unwrap();
        g.set_start(Point::new(1, 1)).unwrap();
        g.set_end(Point::new(6, 6)).unwrap();
        for p in [Point::new(5, 5), Point::new(5, 6), Point::new(6, 5)] {
            g.block(p);
        }
        let outcome = search(&mut g, Algorithm::BreadthFirst).unwrap();
        // every cell reachable from the start is finalized exactly once
        assert_eq!(outcome, SearchOutcome::Unreachable { visited: 32 });
    }
}
