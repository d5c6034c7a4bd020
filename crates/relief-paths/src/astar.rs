use relief_core::{Grid, Point};

use crate::algorithm::Algorithm;
use crate::cost::length;
use crate::search::Search;

impl Search {
    /// Selection key of a cell reached at distance `g`.
    ///
    /// A* adds the straight 3D distance from the cell to the end cell. The
    /// estimate ignores the cost field between them, so it may
    /// overestimate on rough terrain: A* then trades exact optimality for
    /// fewer visited cells.
    pub(crate) fn priority(&self, grid: &Grid, p: Point, g: f64) -> f64 {
        match self.algorithm {
            Algorithm::AStar => {
                let (Some(c), Some(end)) = (grid.at(p), grid.at(self.end)) else {
                    return g;
                };
                g + length(p, c.cost(), self.end, end.cost())
            }
            Algorithm::Dijkstra | Algorithm::BreadthFirst => g,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Algorithm, SearchOutcome, reconstruct_path, search};
    use relief_core::{Grid, Point};

    fn corners(g: &mut Grid) {
        let (w, h) = (g.width(), g.height());
        g.set_start(Point::new(1, 1)).unwrap();
        g.set_end(Point::new(w, h)).unwrap();
    }

    #[test]
    fn matches_dijkstra_on_flat_terrain() {
        let mut a = Grid::new(9, 6).unwrap();
        let mut d = a.clone();
        corners(&mut a);
        corners(&mut d);
        let oa = search(&mut a, Algorithm::AStar).unwrap();
        let od = search(&mut d, Algorithm::Dijkstra).unwrap();
        let (
            SearchOutcome::Reached { distance: da, visited: va },
            SearchOutcome::Reached { distance: dd, visited: vd },
        ) = (oa, od)
        else {
            panic!("both searches should reach the end");
        };
        assert!((da - dd).abs() < 1e-9);
        assert!(va <= vd);
    }

    #[test]
    fn path_is_connected() {
        let mut g = Grid::from_fn(10, 8, |p| f64::from((p.x * 13 + p.y * 7) % 17)).unwrap();
        g.block(Point::new(5, 4));
        g.block(Point::new(5, 5));
        corners(&mut g);
        assert!(search(&mut g, Algorithm::AStar).unwrap().is_reached());
        let path = reconstruct_path(&g);
        assert_eq!(path.first(), Some(&Point::new(1, 1)));
        assert_eq!(path.last(), Some(&Point::new(10, 8)));
        assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1])));
        assert!(path.iter().all(|&p| g.at(p).unwrap().is_traversable()));
    }
}
