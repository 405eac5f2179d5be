//! Stream of lines backed by a background polling task.

use crate::config::WatchConfig;
use crate::error::Result;
use crate::poller::{FilePoller, Line};
use crate::scheduler;
use futures::Stream;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// A stream that polls a file on an interval and yields each new complete line.
///
/// Poll failures are logged and retried on the next tick; they never end
/// the stream.
pub struct LogStream {
    path: PathBuf,
    receiver: mpsc::UnboundedReceiver<Line>,
    _shutdown_tx: broadcast::Sender<()>,
    _task_handle: JoinHandle<()>,
}

impl LogStream {
    /// Creates a new LogStream for the specified file.
    pub async fn new<P: AsRef<Path>>(path: P, config: WatchConfig) -> Result<Self> {
        Self::from_poller(Arc::new(FilePoller::new(path)), config)
    }

    /// Starts streaming from an existing poller, e.g. one with a custom clock.
    pub fn from_poller(poller: Arc<FilePoller>, config: WatchConfig) -> Result<Self> {
        config.validate()?;

        let path = poller.path().to_path_buf();
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let task_handle = tokio::spawn(scheduler::run(poller, config, tx, shutdown_rx));

        Ok(LogStream {
            path,
            receiver: rx,
            _shutdown_tx: shutdown_tx,
            _task_handle: task_handle,
        })
    }

    /// The file being followed.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the stream has been closed/dropped
    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.receiver.is_closed()
    }
}

impl Drop for LogStream {
    fn drop(&mut self) {
        // Ignore errors if the task is already gone
        let _ = self._shutdown_tx.send(());
    }
}

impl Stream for LogStream {
    type Item = Line;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_recv(cx)
    }
}
