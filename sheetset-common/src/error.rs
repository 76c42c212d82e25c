//! Common error types for sheetset

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for sheetset operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the sheetset crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configured library root does not exist or is inaccessible
    #[error("Library not found: {0}")]
    LibraryNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A print command was issued before any song was selected
    #[error("No song selected")]
    NoSongSelected,

    /// Selected song has no folder in the library
    #[error("Song not found in library: {0}")]
    SongNotFound(String),

    /// Requested roster name has no table, builtin or configured
    #[error("Unknown roster: {0}")]
    UnknownRoster(String),

    /// Requested instrument name is not in the catalog
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    /// Print backend invocation failure
    #[error("Print dispatch error: {0}")]
    Dispatch(String),
}
