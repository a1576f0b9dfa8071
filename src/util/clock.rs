use std::{
    sync::atomic::{AtomicI64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

/// Timestamp value asking the server to assign the cell timestamp.
pub const SERVER_TIMESTAMP: i64 = -1;

/// Cell timestamps are microseconds but must be whole milliseconds.
pub const TIMESTAMP_GRANULARITY_MICROS: i64 = 1000;

/// Wall-clock time in microseconds since the epoch.
pub fn now_micros() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as i64)
        .unwrap_or(0)
}

/// Round down to the cell timestamp granularity.
#[inline]
pub fn truncate_to_millis(micros: i64) -> i64 {
    micros - micros.rem_euclid(TIMESTAMP_GRANULARITY_MICROS)
}

/// Hands out server-assigned cell timestamps for one table.
///
/// Timestamps never go backwards even if the wall clock does, so a later
/// commit with a server timestamp either overwrites or supersedes an earlier
/// one.
#[derive(Debug, Default)]
pub struct ServerClock {
    last: AtomicI64,
}

impl ServerClock {
    pub fn new() -> Self {
        ServerClock::default()
    }

    pub fn next_timestamp(&self) -> i64 {
        let now = truncate_to_millis(now_micros());
        let prev = self.last.fetch_max(now, Ordering::AcqRel);
        prev.max(now)
    }
}
