use std::ops::Deref;
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{info, warn};
use rand::Rng;
use relief_core::{Designation, Grid, Point};
use relief_gen::TerrainGen;
use relief_paths::{Algorithm, CancelToken, SearchObserver, SearchOutcome};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::events::{EventSender, SearchEvent};
use crate::pacing::Pacing;
use crate::persist;
use crate::worker::{self, SearchWorker};

/// Summary of a finished search episode.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchReport {
    pub algorithm: Algorithm,
    pub outcome: SearchOutcome,
    /// Start-to-end path, empty when the end was not reached.
    pub path: Vec<Point>,
}

/// What [`Session::toggle`] did.
#[derive(Debug)]
pub enum Toggle {
    /// A background search was started; its events arrive here.
    Started(Receiver<SearchEvent>),
    /// The running search (if any) was cancelled and the episode cleared.
    Reset,
}

/// Read-only access to a session's grid, holding its lock.
///
/// A background search cannot make progress while a view is alive.
pub struct GridView<'a>(MutexGuard<'a, Grid>);

impl Deref for GridView<'_> {
    type Target = Grid;

    fn deref(&self) -> &Grid {
        &self.0
    }
}

/// The owning context of one interactive session.
///
/// The grid is shared with at most one search worker at a time. Every
/// operation that would rebuild or clear the grid is rejected with
/// [`SessionError::SearchInProgress`] while that worker is running.
pub struct Session<R: Rng> {
    config: SessionConfig,
    terrain: TerrainGen<R>,
    grid: Arc<Mutex<Grid>>,
    worker: Option<SearchWorker>,
    last_report: Option<SearchReport>,
}

impl<R: Rng> Session<R> {
    /// Start a session on freshly generated terrain.
    pub fn new(config: SessionConfig, rng: R) -> Result<Self, SessionError> {
        let mut terrain = TerrainGen::new(config.terrain.clone(), rng);
        let grid = terrain.generate()?;
        info!(
            "new session: {}x{} terrain, {} search",
            grid.width(),
            grid.height(),
            config.algorithm
        );
        Ok(Self::with_parts(config, terrain, grid))
    }

    /// Start a session on an existing grid. `rng` is used by later
    /// regenerations.
    pub fn from_grid(config: SessionConfig, rng: R, grid: Grid) -> Self {
        let terrain = TerrainGen::new(config.terrain.clone(), rng);
        Self::with_parts(config, terrain, grid)
    }

    /// Start a session on a grid saved with [`Session::save`].
    pub fn load(config: SessionConfig, rng: R, path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let grid = persist::load(path)?;
        info!("loaded {}x{} grid from {}", grid.width(), grid.height(), path.display());
        Ok(Self::from_grid(config, rng, grid))
    }

    fn with_parts(config: SessionConfig, terrain: TerrainGen<R>, grid: Grid) -> Self {
        Self {
            config,
            terrain,
            grid: Arc::new(Mutex::new(grid)),
            worker: None,
            last_report: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Algorithm for the next search. A running search is not affected.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.config.algorithm = algorithm;
    }

    /// Lock the grid for rendering or inspection.
    ///
    /// Changes go through the session so they stay behind the
    /// [`SessionError::SearchInProgress`] gate.
    pub fn grid(&self) -> GridView<'_> {
        GridView(worker::lock(&self.grid))
    }

    fn grid_mut(&self) -> MutexGuard<'_, Grid> {
        worker::lock(&self.grid)
    }

    /// The cell under pixel `(px, py)`.
    pub fn cell_at_pixel(&self, px: i32, py: i32) -> Point {
        let size = self.config.cell_size.max(1);
        Point::new(px.div_euclid(size), py.div_euclid(size))
    }

    /// Handle a click at pixel `(px, py)`: the first valid click sets the
    /// start, the second the end, and later ones are ignored.
    ///
    /// A click on a blocked or border cell is rejected and changes nothing.
    pub fn click(&mut self, px: i32, py: i32) -> Result<Designation, SessionError> {
        let p = self.cell_at_pixel(px, py);
        self.designate(p)
    }

    /// Same as [`Session::click`] with cell coordinates.
    pub fn designate(&mut self, p: Point) -> Result<Designation, SessionError> {
        self.ensure_idle()?;
        let designation = self.grid_mut().designate(p)?;
        info!("click on {p}: {designation:?}");
        Ok(designation)
    }

    /// Whether a background search is still running.
    pub fn is_searching(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// The report of the last completed search, until the next reset or
    /// regeneration.
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }

    /// Run the configured search on the calling thread, with the configured
    /// pacing.
    pub fn run_search(
        &mut self,
        observer: &mut impl SearchObserver,
    ) -> Result<SearchReport, SessionError> {
        self.prepare_episode()?;
        let pacing = Pacing::from_config(&self.config);
        let report = worker::drive(
            &self.grid,
            self.config.algorithm,
            &CancelToken::new(),
            pacing,
            observer,
        )?;
        self.last_report = Some(report.clone());
        Ok(report)
    }

    /// Start the configured search on a background thread and return the
    /// stream of its events.
    pub fn spawn_search(&mut self) -> Result<Receiver<SearchEvent>, SessionError> {
        let (tx, rx) = mpsc::channel();
        self.spawn_search_with(EventSender(tx))?;
        Ok(rx)
    }

    /// Start the configured search on a background thread, reporting to
    /// `observer`.
    pub fn spawn_search_with<O>(&mut self, observer: O) -> Result<(), SessionError>
    where
        O: SearchObserver + Send + 'static,
    {
        self.prepare_episode()?;
        let algorithm = self.config.algorithm;
        info!("starting {algorithm} search");
        self.worker = Some(SearchWorker::spawn(
            Arc::clone(&self.grid),
            algorithm,
            Pacing::from_config(&self.config),
            observer,
        ));
        Ok(())
    }

    /// Collect the background search if it has finished.
    ///
    /// Returns `Ok(None)` while it is still running or when none was started.
    pub fn poll(&mut self) -> Result<Option<SearchReport>, SessionError> {
        if self.worker.as_ref().is_some_and(|w| w.is_finished()) {
            self.wait().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Block until the background search finishes.
    pub fn wait(&mut self) -> Result<SearchReport, SessionError> {
        let worker = self.worker.take().ok_or(SessionError::NoSearch)?;
        match worker.join() {
            Some(result) => {
                let report = result?;
                self.last_report = Some(report.clone());
                Ok(report)
            }
            None => {
                warn!("search worker panicked");
                Err(SessionError::WorkerPanicked)
            }
        }
    }

    /// Stop the background search and wait for it. Cells keep whatever
    /// state the search had reached.
    pub fn cancel_search(&mut self) -> Result<SearchReport, SessionError> {
        let worker = self.worker.as_ref().ok_or(SessionError::NoSearch)?;
        worker.cancel();
        info!("search cancelled");
        self.wait()
    }

    /// Clear the search episode. Terrain is kept.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.reap();
        self.grid_mut().reset();
        self.last_report = None;
        info!("episode reset");
        Ok(())
    }

    /// Start a search when the grid is clean, otherwise cancel any running
    /// search and reset.
    pub fn toggle(&mut self) -> Result<Toggle, SessionError> {
        let showing = self.worker.is_some() || self.grid().has_search_state();
        if !showing {
            return self.spawn_search().map(Toggle::Started);
        }
        if self.is_searching() {
            // The report of a cancelled episode is discarded by the reset.
            let _ = self.cancel_search();
        }
        self.reset()?;
        Ok(Toggle::Reset)
    }

    /// Replace the grid with freshly generated terrain from the current
    /// config. Endpoints and search state are dropped.
    pub fn regenerate(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let grid = self.terrain.generate()?;
        self.reap();
        info!(
            "regenerated terrain at threshold {:.0}%: {} blocked cells",
            self.config.terrain.threshold_percent,
            grid.blocked_count()
        );
        *self.grid_mut() = grid;
        self.last_report = None;
        Ok(())
    }

    /// Raise the blocking threshold by one percentage point and regenerate.
    pub fn raise_threshold(&mut self) -> Result<(), SessionError> {
        self.step_threshold(1.0)
    }

    /// Lower the blocking threshold by one percentage point and regenerate.
    pub fn lower_threshold(&mut self) -> Result<(), SessionError> {
        self.step_threshold(-1.0)
    }

    fn step_threshold(&mut self, delta: f64) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let before = self.terrain.config.clone();
        self.terrain.config.step_threshold(delta);
        self.config.terrain = self.terrain.config.clone();
        if let Err(e) = self.regenerate() {
            self.terrain.config = before.clone();
            self.config.terrain = before;
            return Err(e);
        }
        Ok(())
    }

    /// Write the whole grid, search state included, to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        persist::save(path, &self.grid())?;
        info!("saved grid to {}", path.display());
        Ok(())
    }

    /// Encode the whole grid as a versioned blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SessionError> {
        Ok(persist::to_bytes(&self.grid())?)
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.is_searching() {
            return Err(SessionError::SearchInProgress);
        }
        Ok(())
    }

    /// Drop a finished worker, keeping its report.
    fn reap(&mut self) {
        if self.worker.as_ref().is_some_and(|w| w.is_finished()) {
            if let Err(e) = self.wait() {
                warn!("discarding finished search: {e}");
            }
        }
    }

    /// Make the grid ready for a new episode, keeping the endpoints.
    fn prepare_episode(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.reap();
        let mut grid = self.grid_mut();
        let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
            return Err(relief_paths::SearchError::MissingEndpoint.into());
        };
        if grid.has_search_state() {
            grid.reset();
            grid.set_start(start)?;
            grid.set_end(end)?;
        }
        drop(grid);
        self.last_report = None;
        Ok(())
    }
}
