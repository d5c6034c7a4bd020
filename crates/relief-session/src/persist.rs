//! Whole-grid persistence as a single binary blob.
//!
//! The blob is the format version followed by the bincode encoding of the
//! [`Grid`], so costs (infinite ones included), statuses, distances,
//! predecessors, endpoints and reveal progress all round-trip exactly.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use relief_core::Grid;

/// Version written at the front of every blob.
pub const GRID_FORMAT_VERSION: u32 = 1;

/// Errors from encoding, decoding or file access.
#[derive(Debug)]
pub enum PersistError {
    Io(std::io::Error),
    Encode(bincode::Error),
    UnsupportedVersion(u32),
    /// The blob decoded but does not describe a valid grid.
    Corrupt,
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Encode(e) => write!(f, "encoding error: {e}"),
            Self::UnsupportedVersion(v) => {
                write!(f, "unsupported grid format version {v} (expected {GRID_FORMAT_VERSION})")
            }
            Self::Corrupt => write!(f, "decoded grid is inconsistent"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<bincode::Error> for PersistError {
    fn from(e: bincode::Error) -> Self {
        Self::Encode(e)
    }
}

/// Encode `grid` into `writer`.
pub fn write_grid(mut writer: impl Write, grid: &Grid) -> Result<(), PersistError> {
    bincode::serialize_into(&mut writer, &GRID_FORMAT_VERSION)?;
    bincode::serialize_into(&mut writer, grid)?;
    writer.flush()?;
    Ok(())
}

/// Decode a grid from `reader`.
pub fn read_grid(mut reader: impl Read) -> Result<Grid, PersistError> {
    let version: u32 = bincode::deserialize_from(&mut reader)?;
    if version != GRID_FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion(version));
    }
    let grid: Grid = bincode::deserialize_from(&mut reader)?;
    if !grid.is_well_formed() {
        return Err(PersistError::Corrupt);
    }
    Ok(grid)
}

pub fn to_bytes(grid: &Grid) -> Result<Vec<u8>, PersistError> {
    let mut buf = Vec::new();
    write_grid(&mut buf, grid)?;
    Ok(buf)
}

pub fn from_bytes(bytes: &[u8]) -> Result<Grid, PersistError> {
    read_grid(bytes)
}

pub fn save(path: impl AsRef<Path>, grid: &Grid) -> Result<(), PersistError> {
    let file = File::create(path)?;
    write_grid(BufWriter::new(file), grid)
}

pub fn load(path: impl AsRef<Path>) -> Result<Grid, PersistError> {
    let file = File::open(path)?;
    read_grid(BufReader::new(file))
}
