//! Follows a growing log file by polling it and emits each newly completed line.
//!
//! The file is reopened on every poll. A file that shrank below the last read
//! position is treated as truncated or rotated and read again from the start.
//! A trailing line without a newline is held back until it is finished.
//!
//! # Example
//!
//! ```rust,no_run
//! use log_poller::{watch_log, WatchConfig};
//! use tokio_stream::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut stream = watch_log("app.log", WatchConfig::default()).await?;
//!
//!     while let Some(line) = stream.next().await {
//!         println!("{}: {}", line.path.display(), line.text);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! For direct control over when polls happen, use [`FilePoller`]:
//!
//! ```rust,no_run
//! use log_poller::FilePoller;
//!
//! # async fn run() -> log_poller::Result<()> {
//! let poller = FilePoller::new("app.log");
//! let count = poller.poll(|line| println!("{}", line.text)).await?;
//! # let _ = count;
//! # Ok(())
//! # }
//! ```

mod clock;
mod config;
mod error;
mod format;
mod offset;
mod poller;
mod reader;
mod scheduler;
mod stream;
mod watcher;

#[cfg(test)]
mod test_helpers;

// Public API exports
pub use clock::{Clock, SystemClock};
pub use config::{DEFAULT_INTERVAL, WatchConfig};
pub use error::{Error, Result};
pub use format::{OutputSink, format_elapsed, format_line};
pub use offset::effective_offset;
pub use poller::{FilePoller, Line};
pub use stream::LogStream;

use std::path::Path;

/// Creates a stream that polls a file and yields each new complete line.
///
/// Fails only if `config` is invalid. A file that does not exist yet is
/// waited for.
pub async fn watch_log<P: AsRef<Path>>(path: P, config: WatchConfig) -> Result<LogStream> {
    LogStream::new(path, config).await
}
