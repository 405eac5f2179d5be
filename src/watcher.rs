//! Change notifications used to poll early, via the notify crate.
//!
//! Notifications only shorten the wait for the next poll. The interval keeps
//! running, so missed or coalesced events cost latency, never lines.

use crate::error::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Wakes the scheduler when the filesystem reports activity on one file.
pub(crate) struct ChangeNotifier {
    _watcher: RecommendedWatcher,
    receiver: mpsc::UnboundedReceiver<()>,
}

impl ChangeNotifier {
    /// Watches the parent directory of `path`, so the file may be created,
    /// removed or renamed over without losing the watch.
    pub(crate) fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();
        let file_name = file_path.file_name().map(|name| name.to_os_string());
        let watch_dir = watch_dir(&file_path);

        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if is_event_relevant_to_file(&event, file_name.as_ref()) {
                        let _ = tx.send(());
                    }
                }
                Err(e) => tracing::debug!(error = %e, "Change notification error"),
            },
            Config::default(),
        )?;
        watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Waits for the next change, folding any queued ones into it.
    pub(crate) async fn changed(&mut self) -> Option<()> {
        self.receiver.recv().await?;
        while self.receiver.try_recv().is_ok() {}
        Some(())
    }
}

fn watch_dir(file_path: &Path) -> PathBuf {
    match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Check if a notify event names the target file
fn is_event_relevant_to_file(event: &Event, target_file_name: Option<&OsString>) -> bool {
    let Some(target) = target_file_name else {
        return false;
    };
    event
        .paths
        .iter()
        .any(|path| path.file_name() == Some(target.as_os_str()))
}
