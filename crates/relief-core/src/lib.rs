//! **relief-core**: terrain grid types.
//!
//! This crate provides the lattice that every other *relief* crate works
//! on: geometry primitives, the [`Cell`] with its cost and search-episode
//! state, and the bordered [`Grid`] arena with neighbor queries and
//! endpoint designation.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod neighbors;

pub use cell::{Cell, INFINITE_COST, Status};
pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::{Designation, Grid, MAX_CELLS};
pub use neighbors::Neighbors;
