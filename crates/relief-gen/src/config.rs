/// Parameters of a generated terrain.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainConfig {
    /// Interior width in cells.
    pub width: i32,
    /// Interior height in cells.
    pub height: i32,
    /// How many median-smoothing passes to run. 0 disables smoothing.
    pub smoothing_passes: usize,
    /// Chebyshev radius of the smoothing neighbourhood.
    pub smoothing_radius: i32,
    /// Cells cheaper than this percentage of `max_cost` are blocked.
    pub threshold_percent: f64,
    /// Interior costs are drawn uniformly from `0..=max_cost`.
    pub max_cost: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 38,
            height: 29,
            smoothing_passes: 1,
            smoothing_radius: 2,
            threshold_percent: 50.0,
            max_cost: 256,
        }
    }
}

impl TerrainConfig {
    /// The absolute cost below which cells are blocked.
    pub fn threshold(&self) -> f64 {
        f64::from(self.max_cost) * self.threshold_percent / 100.0
    }

    /// Move the threshold by `delta` percentage points, clamped to `[0, 100]`.
    pub fn step_threshold(&mut self, delta: f64) {
        self.threshold_percent = (self.threshold_percent + delta).clamp(0.0, 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_percentage_of_range() {
        let cfg = TerrainConfig::default();
        assert_eq!(cfg.threshold(), 128.0);
        let cfg = TerrainConfig {
            threshold_percent: 25.0,
            max_cost: 100,
            ..Default::default()
        };
        assert_eq!(cfg.threshold(), 25.0);
    }

    #[test]
    fn step_threshold_clamps() {
        let mut cfg = TerrainConfig::default();
        cfg.step_threshold(1.0);
        assert_eq!(cfg.threshold_percent, 51.0);
        cfg.step_threshold(-200.0);
        assert_eq!(cfg.threshold_percent, 0.0);
        cfg.step_threshold(150.0);
        assert_eq!(cfg.threshold_percent, 100.0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = TerrainConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: TerrainConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
