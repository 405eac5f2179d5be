//! Rendering of emitted lines and the sinks they are written to.

use crate::poller::Line;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Formats a line as `YYYY/MM/DD HH:MM:SS [elapsed] path - text`.
pub fn format_line(line: &Line) -> String {
    format!(
        "{} [{}] {} - {}",
        line.observed_at.format(TIMESTAMP_FORMAT),
        format_elapsed(line.elapsed),
        line.path.display(),
        line.text
    )
}

/// Renders a duration rounded to the nearest second, e.g. `0s`, `1m5s`, `2h0m3s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let mut secs = elapsed.as_secs();
    if elapsed.subsec_millis() >= 500 {
        secs += 1;
    }

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Where emitted lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputSink {
    /// Print the formatted line on standard output.
    #[default]
    Stdout,
    /// Record the line as a structured `tracing` event.
    Log,
}

impl OutputSink {
    pub fn emit(&self, line: &Line) {
        match self {
            OutputSink::Stdout => println!("{}", format_line(line)),
            OutputSink::Log => tracing::info!(
                path = %line.path.display(),
                elapsed = %format_elapsed(line.elapsed),
                "{}",
                line.text
            ),
        }
    }
}

impl FromStr for OutputSink {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(OutputSink::Stdout),
            "log" => Ok(OutputSink::Log),
            other => Err(format!("unknown output '{}' (expected stdout or log)", other)),
        }
    }
}

impl fmt::Display for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSink::Stdout => write!(f, "stdout"),
            OutputSink::Log => write!(f, "log"),
        }
    }
}
