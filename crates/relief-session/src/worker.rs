//! The background search thread.
//!
//! The grid lock is held for one step at a time, so a renderer sharing the
//! grid sees a consistent snapshot between steps and never waits for a
//! whole search.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use log::warn;
use relief_core::Grid;
use relief_paths::{
    Algorithm, CancelToken, Search, SearchError, SearchObserver, Step, reconstruct_path,
    reveal_progress,
};

use crate::pacing::Pacing;
use crate::session::SearchReport;

/// Lock the shared grid, recovering it if a previous holder panicked.
///
/// Cell state is only ever mutated one field at a time, so a poisoned grid
/// is still well formed.
pub(crate) fn lock(grid: &Mutex<Grid>) -> MutexGuard<'_, Grid> {
    grid.lock().unwrap_or_else(|poisoned| {
        warn!("grid lock poisoned, recovering");
        poisoned.into_inner()
    })
}

/// Run one search episode on `grid`, then reveal the path if one was found.
///
/// Cancellation is checked between steps and between reveal steps.
pub(crate) fn drive(
    grid: &Mutex<Grid>,
    algorithm: Algorithm,
    cancel: &CancelToken,
    pacing: Pacing,
    observer: &mut impl SearchObserver,
) -> Result<SearchReport, SearchError> {
    let mut search = Search::new(&lock(grid), algorithm)?;

    let outcome = loop {
        if cancel.is_cancelled() {
            let outcome = search.cancel();
            observer.finished(&outcome);
            break outcome;
        }
        {
            let mut g = lock(grid);
            match search.step(&mut g) {
                Step::Visited(p) => observer.visited(&g, p),
                Step::Done(outcome) => {
                    observer.finished(&outcome);
                    break outcome;
                }
            }
        }
        pacing.pause_step();
    };

    let path = if outcome.is_reached() {
        let g = lock(grid);
        reconstruct_path(&g)
    } else {
        Vec::new()
    };

    let progress = reveal_progress(&lock(grid), &path);
    for (p, t) in progress {
        if cancel.is_cancelled() {
            break;
        }
        if let Some(c) = lock(grid).at_mut(p) {
            c.set_reveal(t);
        }
        observer.revealed(p, t);
        pacing.pause_reveal();
    }

    Ok(SearchReport {
        algorithm,
        outcome,
        path,
    })
}

/// A search running on its own thread.
///
/// Dropping the worker cancels the search and waits for the thread, so no
/// step runs after its owner is gone.
pub(crate) struct SearchWorker {
    cancel: CancelToken,
    handle: Option<JoinHandle<Result<SearchReport, SearchError>>>,
}

impl SearchWorker {
    pub(crate) fn spawn<O>(
        grid: Arc<Mutex<Grid>>,
        algorithm: Algorithm,
        pacing: Pacing,
        mut observer: O,
    ) -> Self
    where
        O: SearchObserver + Send + 'static,
    {
        let cancel = CancelToken::new();
        let token = cancel.clone();
        let handle = thread::spawn(move || drive(&grid, algorithm, &token, pacing, &mut observer));
        Self {
            cancel,
            handle: Some(handle),
        }
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    pub(crate) fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the thread. `None` if it panicked.
    pub(crate) fn join(mut self) -> Option<Result<SearchReport, SearchError>> {
        self.handle.take()?.join().ok()
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.cancel.cancel();
            if handle.join().is_err() {
                warn!("search thread panicked");
            }
        }
    }
}
