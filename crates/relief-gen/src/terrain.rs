//! Cost field generation.
//!
//! 1. Every interior cell gets an independent random integer cost in
//!    `0..=max_cost`. The border ring keeps its infinite cost.
//! 2. Each smoothing pass replaces every traversable cell's cost with the
//!    median of its traversable neighbours, all read from the field as it
//!    was before the pass.
//! 3. Cells whose cost falls below the threshold are blocked. Their cost is
//!    kept as computed; only the status changes.

use log::debug;
use rand::Rng;
use relief_core::{Grid, GridError, Neighbors};

use crate::config::TerrainConfig;

/// Terrain generator driven by an injectable random source.
pub struct TerrainGen<R: Rng> {
    pub rng: R,
    pub config: TerrainConfig,
}

impl<R: Rng> TerrainGen<R> {
    /// Create a generator for `config`.
    pub fn new(config: TerrainConfig, rng: R) -> Self {
        Self { rng, config }
    }

    /// Build a brand new grid. Nothing is shared with earlier grids.
    pub fn generate(&mut self) -> Result<Grid, GridError> {
        let cfg = &self.config;
        let max_cost = cfg.max_cost;
        let rng = &mut self.rng;
        let mut grid = Grid::from_fn(cfg.width, cfg.height, |_| {
            f64::from(rng.random_range(0..=max_cost))
        })?;

        for _ in 0..cfg.smoothing_passes {
            smooth(&mut grid, cfg.smoothing_radius);
        }
        apply_threshold(&mut grid, cfg.threshold());

        debug!(
            "generated {}x{} terrain: {} smoothing pass(es), threshold {:.1}, {} blocked",
            cfg.width,
            cfg.height,
            cfg.smoothing_passes,
            cfg.threshold(),
            grid.blocked_count()
        );
        Ok(grid)
    }
}

/// Generate a terrain with the default cost range and smoothing radius.
pub fn generate<R: Rng>(
    width: i32,
    height: i32,
    smoothing_passes: usize,
    threshold_percent: f64,
    rng: &mut R,
) -> Result<Grid, GridError> {
    let config = TerrainConfig {
        width,
        height,
        smoothing_passes,
        threshold_percent,
        ..Default::default()
    };
    TerrainGen::new(config, rng).generate()
}

/// Run one median-smoothing pass over the traversable cells of `grid`.
///
/// The median is the upper one, `sorted[n / 2]`, of the costs of the
/// traversable interior cells within `radius` (the cell itself excluded).
/// A cell without such neighbours keeps its cost.
pub fn smooth(grid: &mut Grid, radius: i32) {
    let mut nb = Neighbors::new();
    let mut costs = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);

    let smoothed: Vec<_> = grid
        .interior_cells()
        .filter(|c| c.is_traversable())
        .map(|c| {
            costs.clear();
            costs.extend(
                grid.neighbors_with(&mut nb, c.pos(), radius)
                    .iter()
                    .filter_map(|&n| grid.at(n))
                    .filter(|n| n.is_traversable())
                    .map(|n| n.cost()),
            );
            if costs.is_empty() {
                return (c.pos(), c.cost());
            }
            costs.sort_by(f64::total_cmp);
            (c.pos(), costs[costs.len() / 2])
        })
        .collect();

    for (p, cost) in smoothed {
        grid.set_cost(p, cost);
    }
}

/// Block every interior cell whose cost is below `threshold`.
pub fn apply_threshold(grid: &mut Grid, threshold: f64) {
    let below: Vec<_> = grid
        .interior_cells()
        .filter(|c| c.cost() < threshold)
        .map(|c| c.pos())
        .collect();
    for p in below {
        grid.block(p);
    }
}
