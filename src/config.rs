//! Watch configuration.

use crate::error::{Error, Result};
use std::time::Duration;

/// Poll interval used when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// How a file is followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// Time between scheduled polls.
    pub interval: Duration,
    /// Also poll as soon as a filesystem change to the file is reported.
    pub wake_on_change: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            wake_on_change: false,
        }
    }
}

impl WatchConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_wake_on_change(mut self, enabled: bool) -> Self {
        self.wake_on_change = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(Error::InvalidConfig {
                message: "poll interval must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
