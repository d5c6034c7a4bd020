//! Interactive pathfinding sessions over generated terrain.
//!
//! A [`Session`] owns the grid and everything that mutates it: click
//! handling, terrain regeneration, threshold stepping, the search worker
//! and persistence. There is no global state; the application holds the
//! session and passes it around.

pub mod config;
pub mod error;
pub mod events;
pub mod pacing;
pub mod persist;
pub mod session;
mod worker;

pub use config::SessionConfig;
pub use error::SessionError;
pub use events::{EventSender, SearchEvent};
pub use pacing::Pacing;
pub use persist::{GRID_FORMAT_VERSION, PersistError};
pub use session::{GridView, SearchReport, Session, Toggle};
