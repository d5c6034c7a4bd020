//! Shortest-path search over relief terrain grids.
//!
//! The grid is a weighted graph with 8-connectivity. Moving between
//! adjacent cells costs the 3D Euclidean distance between
//! `(x, y, cost)` points, so slopes are more expensive than flats
//! ([`edge_cost`]).
//!
//! - **Dijkstra** finalizes the unvisited cell with the smallest distance.
//! - **A\*** orders by distance plus the straight elevation-aware distance
//!   to the end cell.
//! - **Breadth-first** ignores weights and stops when the end is dequeued.
//!
//! All three run through [`Search`], a resumable state machine: each
//! [`Search::step`] finalizes one cell, so callers can pace, observe or
//! cancel between steps and always see a consistent grid.
//! [`reconstruct_path`] and [`apply_reveal`] turn the predecessor links
//! into a start-to-end path with progress values for display.

mod algorithm;
mod astar;
mod bfs;
mod control;
mod cost;
mod dijkstra;
mod path;
mod search;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use control::{CancelToken, SearchObserver};
pub use cost::edge_cost;
pub use path::{apply_reveal, reconstruct_path, reveal_progress};
pub use search::{Search, SearchError, SearchOutcome, Step, search};
