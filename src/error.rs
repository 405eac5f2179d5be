//! Error types for the log poller.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for polling operations.
///
/// A missing target file is not represented here: it is a quiet condition
/// and a poll against it simply yields no lines.
#[derive(Error, Debug)]
pub enum Error {
    /// The file exists but could not be opened (permissions, I/O fault).
    #[error("Open error: {} - {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Metadata for the open file could not be read.
    #[error("Stat error: {} - {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Seeking to the tracked offset failed.
    #[error("Seek error: {} - {source}", .path.display())]
    Seek {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A read failed mid-stream (anything other than end-of-file).
    #[error("Read error: {} - {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File watching errors from the notify crate.
    #[error("File watcher error: {0}")]
    Watcher(#[from] notify::Error),

    /// Rejected watch configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl Error {
    /// The watched path this error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::Open { path, .. }
            | Error::Stat { path, .. }
            | Error::Seek { path, .. }
            | Error::Read { path, .. } => Some(path),
            Error::Watcher(_) | Error::InvalidConfig { .. } => None,
        }
    }
}

/// A convenient Result type for log poller operations.
pub type Result<T> = std::result::Result<T, Error>;
