/// Reads
///
/// Every read pins a snapshot of the table's row index, takes each row image
/// visible at it, applies the family GC rules as of now, then the request
/// filter. Rows left without cells are reported absent.
///
/// ```text
/// ReadRowsOptions ─→ ranges (sorted by start)
///                      ↓
/// RowIterator ─→ next visible row at snapshot ─→ GC view ─→ filter ─→ Row
/// ```
mod row;
mod row_iterator;
mod row_set;

pub use row::Row;
pub use row_iterator::RowIterator;
pub use row_set::{RowRange, RowSet};

use std::ops::Bound;

use crate::{
    filter::RowFilter,
    util::{Result, Slice, Status},
};

/// Options of a range scan.
///
/// Keys bound the scan to `[start_key, end_key)`, or `[start_key, end_key]`
/// with `end_inclusive`. A non-empty `row_set` selects rows instead and
/// cannot be combined with key bounds.
///
/// ```ignore
/// let rows: Vec<Row> = table
///     .read_rows(ReadRowsOptions::new().start_key("a").end_key("c").limit(10))?
///     .collect();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReadRowsOptions {
    pub start_key: Option<Slice>,
    pub end_key: Option<Slice>,
    pub end_inclusive: bool,
    /// Most rows to return; `None` or `Some(0)` is unlimited
    pub limit: Option<usize>,
    pub filter: Option<RowFilter>,
    pub row_set: Option<RowSet>,
}

impl ReadRowsOptions {
    pub fn new() -> Self {
        ReadRowsOptions::default()
    }

    pub fn start_key(mut self, key: impl Into<Slice>) -> Self {
        self.start_key = Some(key.into());
        self
    }

    pub fn end_key(mut self, key: impl Into<Slice>) -> Self {
        self.end_key = Some(key.into());
        self
    }

    pub fn end_inclusive(mut self, inclusive: bool) -> Self {
        self.end_inclusive = inclusive;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filter(mut self, filter: RowFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn row_set(mut self, row_set: RowSet) -> Self {
        self.row_set = Some(row_set);
        self
    }

    /// Key ranges to scan, ordered by start.
    pub(crate) fn ranges(&self) -> Result<Vec<RowRange>> {
        let has_bounds = self.start_key.is_some() || self.end_key.is_some();
        match &self.row_set {
            Some(row_set) if !row_set.is_empty() => {
                if has_bounds {
                    return Err(Status::invalid_argument(
                        "row_set cannot be combined with start_key or end_key",
                    ));
                }
                Ok(row_set.to_ranges())
            },
            _ => {
                let range = if self.end_inclusive {
                    let mut range = RowRange::closed_open(self.start_key.clone(), None);
                    if let Some(end) = &self.end_key {
                        range.end = Bound::Included(end.clone());
                    }
                    range
                } else {
                    RowRange::closed_open(self.start_key.clone(), self.end_key.clone())
                };
                Ok(vec![range])
            },
        }
    }

    pub(crate) fn effective_limit(&self) -> Option<usize> {
        self.limit.filter(|&n| n > 0)
    }
}
