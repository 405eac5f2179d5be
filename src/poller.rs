//! One polling pass over the watched file.

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::offset::WatchState;
use crate::reader::LineReader;
use chrono::{DateTime, Local};
use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncSeekExt, BufReader};
use tokio::sync::Mutex;
use tracing::debug;

/// A complete line observed in the watched file.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// The file the line was read from.
    pub path: PathBuf,
    /// Line content without terminator or surrounding whitespace.
    pub text: String,
    /// Byte offset immediately after the line's terminator.
    pub end_offset: u64,
    /// When the line was read.
    pub observed_at: DateTime<Local>,
    /// Time between the poller's creation and `observed_at`.
    pub elapsed: Duration,
}

/// Follows a single file, emitting lines appended since the previous poll.
///
/// Each call to [`FilePoller::poll`] reopens the file, so truncation and
/// replacement show up as a size smaller than the tracked offset. Polls are
/// serialized: a second call waits until the one in progress has finished and
/// then starts from the offset it left behind.
pub struct FilePoller {
    path: PathBuf,
    state: Mutex<WatchState>,
    clock: Arc<dyn Clock>,
}

impl FilePoller {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    /// Creates a poller stamping lines with `clock`. The start time used for
    /// elapsed annotations is read from the clock here.
    pub fn with_clock<P: AsRef<Path>>(path: P, clock: Arc<dyn Clock>) -> Self {
        let path = path.as_ref().to_path_buf();
        let state = WatchState::new(path.clone(), clock.now());
        Self {
            path,
            state: Mutex::new(state),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Offset just past the last emitted line. Waits for any running poll.
    pub async fn last_offset(&self) -> u64 {
        self.state.lock().await.last_offset()
    }

    /// Read every complete line appended since the last poll, handing each to
    /// `emit` in file order. Returns how many lines were emitted.
    ///
    /// A missing file yields `Ok(0)` and leaves the state alone. On a read
    /// error the lines already emitted by this call stay consumed.
    pub async fn poll<F>(&self, mut emit: F) -> Result<usize>
    where
        F: FnMut(Line),
    {
        let mut state = self.state.lock().await;

        let mut file = match File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "File not found; waiting for it to appear");
                return Ok(0);
            }
            Err(source) => {
                return Err(Error::Open {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let current_size = file
            .metadata()
            .await
            .map_err(|source| Error::Stat {
                path: self.path.clone(),
                source,
            })?
            .len();

        // A truncation reset is committed before seeking, even if the seek fails.
        let offset = state.rewind_if_truncated(current_size);

        file.seek(SeekFrom::Start(offset))
            .await
            .map_err(|source| Error::Seek {
                path: self.path.clone(),
                source,
            })?;

        let reader = LineReader::new(BufReader::new(file), offset);
        let emitted = self.drain(&mut state, reader, &mut emit).await?;

        debug!(
            path = %state.path().display(),
            lines = emitted,
            offset = state.last_offset(),
            "Poll complete"
        );
        Ok(emitted)
    }

    /// Emits every complete line from `reader`, advancing `state` after each.
    ///
    /// On a read error nothing is rolled back: `state` keeps the offset of the
    /// last line emitted before the failure.
    async fn drain<R, F>(
        &self,
        state: &mut WatchState,
        mut reader: LineReader<R>,
        emit: &mut F,
    ) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        F: FnMut(Line),
    {
        let mut emitted = 0;
        loop {
            match reader.next_line().await {
                Ok(Some((text, end_offset))) => {
                    let observed_at = self.clock.now();
                    let elapsed = (observed_at - state.start_time())
                        .to_std()
                        .unwrap_or_default();
                    emit(Line {
                        path: self.path.clone(),
                        text,
                        end_offset,
                        observed_at,
                        elapsed,
                    });
                    state.advance(end_offset);
                    emitted += 1;
                }
                Ok(None) => return Ok(emitted),
                Err(source) => {
                    return Err(Error::Read {
                        path: self.path.clone(),
                        source,
                    });
                }
            }
        }
    }
}
