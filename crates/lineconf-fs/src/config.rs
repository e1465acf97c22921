//! Storage settings

use std::time::Duration;

/// Settings for file writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// How long a write waits for the sidecar file lock before giving up
    pub lock_timeout: Duration,
    /// Flush written data to disk before the rename
    pub enable_fsync: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            enable_fsync: true,
        }
    }
}

impl StoreConfig {
    pub fn with_lock_timeout(mut self, lock_timeout: Duration) -> Self {
        self.lock_timeout = lock_timeout;
        self
    }

    pub fn with_fsync(mut self, enable_fsync: bool) -> Self {
        self.enable_fsync = enable_fsync;
        self
    }
}
