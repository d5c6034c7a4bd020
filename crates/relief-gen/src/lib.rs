//! Terrain generation for relief grids.
//!
//! Fills a bordered [`Grid`](relief_core::Grid) with random costs, smooths
//! them by neighbourhood median and blocks everything below a threshold.

pub mod config;
pub mod terrain;

pub use config::TerrainConfig;
pub use terrain::{TerrainGen, apply_threshold, generate, smooth};
