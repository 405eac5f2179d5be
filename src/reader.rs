//! Incremental extraction of complete lines from a byte stream.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Pulls newline-terminated lines from `inner`, tracking the byte offset just
/// past each one.
///
/// The reader stops for good at the first point where no complete line is
/// available: end of stream, or a trailing fragment with no `\n` yet. The
/// fragment is not reported and `position` stays at its start, so a later
/// reader opened at that position sees it again once it has been finished.
pub(crate) struct LineReader<R> {
    inner: R,
    position: u64,
    buf: Vec<u8>,
    exhausted: bool,
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    /// `position` is the file offset `inner` is currently positioned at.
    pub(crate) fn new(inner: R, position: u64) -> Self {
        Self {
            inner,
            position,
            buf: Vec::new(),
            exhausted: false,
        }
    }

    /// Offset just past the last complete line returned.
    #[cfg(test)]
    pub(crate) fn position(&self) -> u64 {
        self.position
    }

    /// Returns the next complete line and the offset immediately after it, or
    /// `None` once no complete line remains.
    pub(crate) async fn next_line(&mut self) -> std::io::Result<Option<(String, u64)>> {
        if self.exhausted {
            return Ok(None);
        }

        self.buf.clear();
        let read = match self.inner.read_until(b'\n', &mut self.buf).await {
            Ok(read) => read,
            Err(e) => {
                self.exhausted = true;
                return Err(e);
            }
        };

        if read == 0 || self.buf.last() != Some(&b'\n') {
            self.exhausted = true;
            return Ok(None);
        }

        self.position += read as u64;
        Ok(Some((decode_line(&self.buf), self.position)))
    }
}

/// Decode raw line bytes, dropping the terminator and surrounding whitespace.
fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}
