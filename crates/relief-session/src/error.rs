use std::fmt;

use relief_core::GridError;
use relief_paths::SearchError;

use crate::persist::PersistError;

/// Errors surfaced by [`Session`](crate::Session) operations.
///
/// All of them are recoverable; the session is left unchanged.
#[derive(Debug)]
pub enum SessionError {
    /// A search is running; cancel or wait for it first.
    SearchInProgress,
    /// There is no search to wait for.
    NoSearch,
    /// The search worker panicked.
    WorkerPanicked,
    Grid(GridError),
    Search(SearchError),
    Persist(PersistError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SearchInProgress => write!(f, "a search is already in progress"),
            Self::NoSearch => write!(f, "no search has been started"),
            Self::WorkerPanicked => write!(f, "the search worker panicked"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Search(e) => write!(f, "search: {e}"),
            Self::Persist(e) => write!(f, "persistence: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Persist(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SessionError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<SearchError> for SessionError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<PersistError> for SessionError {
    fn from(e: PersistError) -> Self {
        Self::Persist(e)
    }
}
