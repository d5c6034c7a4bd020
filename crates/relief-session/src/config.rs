use std::time::Duration;

use relief_gen::TerrainConfig;
use relief_paths::Algorithm;
use serde::{Deserialize, Serialize};

/// Session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub terrain: TerrainConfig,
    /// Search strategy used by [`Session::run_search`](crate::Session::run_search)
    /// and [`Session::spawn_search`](crate::Session::spawn_search).
    pub algorithm: Algorithm,
    /// Side of a cell in pixels, for click translation.
    pub cell_size: i32,
    /// Pause after each finalized cell. Zero disables pacing.
    pub step_delay: Duration,
    /// Pause after each revealed path cell. Zero disables pacing.
    pub reveal_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            terrain: TerrainConfig::default(),
            algorithm: Algorithm::AStar,
            cell_size: 32,
            step_delay: Duration::ZERO,
            reveal_delay: Duration::ZERO,
        }
    }
}
