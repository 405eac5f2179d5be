//! Fixed-interval driver for a [`FilePoller`].

use crate::config::WatchConfig;
use crate::poller::{FilePoller, Line};
use crate::watcher::ChangeNotifier;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

/// Runs polls on every tick until a shutdown signal arrives.
///
/// Each tick spawns its own poll. A slow poll does not hold up the timer;
/// later polls queue on the poller's lock and run in order.
pub(crate) async fn run(
    poller: Arc<FilePoller>,
    config: WatchConfig,
    tx: mpsc::UnboundedSender<Line>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let mut notifier = if config.wake_on_change {
        match ChangeNotifier::new(poller.path()) {
            Ok(notifier) => Some(notifier),
            Err(e) => {
                warn!(
                    path = %poller.path().display(),
                    error = %e,
                    "Change notifications unavailable; polling on interval only"
                );
                None
            }
        }
    } else {
        None
    };

    let mut ticker = time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

    debug!(
        path = %poller.path().display(),
        interval_ms = config.interval.as_millis() as u64,
        "Scheduler started"
    );

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            _ = ticker.tick() => {}
            Some(()) = changed(&mut notifier) => {}
        }

        spawn_poll(Arc::clone(&poller), tx.clone());
    }

    debug!(path = %poller.path().display(), "Scheduler stopped");
}

async fn changed(notifier: &mut Option<ChangeNotifier>) -> Option<()> {
    match notifier {
        Some(notifier) => notifier.changed().await,
        None => std::future::pending().await,
    }
}

fn spawn_poll(poller: Arc<FilePoller>, tx: mpsc::UnboundedSender<Line>) {
    tokio::spawn(async move {
        let result = poller
            .poll(|line| {
                let _ = tx.send(line);
            })
            .await;
        if let Err(e) = result {
            warn!(path = %poller.path().display(), error = %e, "Poll failed");
        }
    });
}
