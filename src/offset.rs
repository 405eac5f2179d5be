//! Read-position tracking for a single watched file.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Decide where the next read should start.
///
/// A file that is now smaller than the tracked offset was truncated or
/// replaced, so reading restarts at byte 0. An unchanged size is idle, not
/// truncation.
pub fn effective_offset(current_size: u64, tracked_offset: u64) -> u64 {
    if current_size < tracked_offset {
        0
    } else {
        tracked_offset
    }
}

/// Per-file polling state.
///
/// `last_offset` is always 0 or the byte offset just past a complete line
/// that has already been emitted.
#[derive(Debug, Clone)]
pub(crate) struct WatchState {
    path: PathBuf,
    last_offset: u64,
    start_time: DateTime<Local>,
}

impl WatchState {
    pub(crate) fn new(path: impl Into<PathBuf>, start_time: DateTime<Local>) -> Self {
        Self {
            path: path.into(),
            last_offset: 0,
            start_time,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn last_offset(&self) -> u64 {
        self.last_offset
    }

    pub(crate) fn start_time(&self) -> DateTime<Local> {
        self.start_time
    }

    /// Apply the truncation check against `current_size`, committing a reset
    /// if one is needed. Returns the offset to seek to.
    pub(crate) fn rewind_if_truncated(&mut self, current_size: u64) -> u64 {
        let offset = effective_offset(current_size, self.last_offset);
        if offset != self.last_offset {
            tracing::info!(
                path = %self.path.display(),
                size = current_size,
                offset = self.last_offset,
                "File truncated; reading from start"
            );
            self.last_offset = offset;
        }
        offset
    }

    /// Record that everything up to `offset` has been consumed.
    pub(crate) fn advance(&mut self, offset: u64) {
        self.last_offset = offset;
    }
}
