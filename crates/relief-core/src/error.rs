//! Errors raised by grid construction and endpoint designation.

use std::fmt;

use crate::geom::Point;

/// Recoverable grid errors. None of them leaves the grid modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height is not strictly positive.
    InvalidDimensions { width: i32, height: i32 },
    /// The cell is non-traversable or outside the addressable interior.
    InvalidEndpoint(Point),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
            Self::InvalidEndpoint(p) => write!(f, "cell {p} cannot be a search endpoint"),
        }
    }
}

impl std::error::Error for GridError {}
