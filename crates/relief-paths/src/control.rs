//! Cooperative cancellation and progress observation for long searches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use relief_core::{Grid, Point};

use crate::search::SearchOutcome;

/// Stop flag checked by a running search between two steps.
///
/// Clones share one flag: the worker keeps a clone, the caller flips it.
#[derive(Clone, Debug)]
pub struct CancelToken {
    stop: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Ask the search to stop. Takes effect before its next step.
    #[inline]
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Receives search progress, one finalized cell at a time.
///
/// All hooks default to no-ops; `()` observes nothing.
pub trait SearchObserver {
    /// Called after `p` was finalized. `grid` is a consistent snapshot.
    fn visited(&mut self, _grid: &Grid, _p: Point) {}

    /// Called once when the search stops for any reason.
    fn finished(&mut self, _outcome: &SearchOutcome) {}

    /// Called for each path cell as its reveal progress is written.
    fn revealed(&mut self, _p: Point, _progress: f64) {}
}

impl SearchObserver for () {}
