use serde::{Deserialize, Serialize};

use crate::util::Slice;

/// One timestamped value at a (row, family, qualifier) coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub(crate) timestamp_micros: i64,
    pub(crate) value: Slice,
    /// Labels attached by an `ApplyLabel` filter. Always empty in storage.
    pub(crate) labels: Vec<String>,
}

impl Cell {
    pub fn new(timestamp_micros: i64, value: Slice) -> Self {
        Cell {
            timestamp_micros,
            value,
            labels: Vec::new(),
        }
    }

    pub fn timestamp_micros(&self) -> i64 {
        self.timestamp_micros
    }

    pub fn value(&self) -> &Slice {
        &self.value
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Half-open timestamp interval `[start_micros, end_micros)`.
///
/// `end_micros == None` leaves the interval unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimestampRange {
    pub start_micros: i64,
    pub end_micros: Option<i64>,
}

impl TimestampRange {
    /// Every timestamp.
    pub fn all() -> Self {
        TimestampRange::default()
    }

    pub fn new(start_micros: i64, end_micros: Option<i64>) -> Self {
        TimestampRange {
            start_micros,
            end_micros,
        }
    }

    /// Exactly one timestamp.
    pub fn single(timestamp_micros: i64) -> Self {
        TimestampRange {
            start_micros: timestamp_micros,
            end_micros: Some(timestamp_micros.saturating_add(1)),
        }
    }

    #[inline]
    pub fn contains(&self, timestamp_micros: i64) -> bool {
        timestamp_micros >= self.start_micros
            && self.end_micros.is_none_or(|end| timestamp_micros < end)
    }

    pub(crate) fn validate(&self) -> crate::util::Result<()> {
        if self.start_micros < 0 {
            return Err(crate::util::Status::invalid_argument(format!(
                "timestamp range start {} is negative",
                self.start_micros
            )));
        }
        if let Some(end) = self.end_micros
            && end < self.start_micros
        {
            return Err(crate::util::Status::invalid_argument(format!(
                "timestamp range end {end} precedes start {}",
                self.start_micros
            )));
        }
        Ok(())
    }
}
