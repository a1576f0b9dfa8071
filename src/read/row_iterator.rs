use std::{cmp::Ordering, ops::Bound, sync::Arc};

use crate::{
    filter::RowFilter,
    read::{Row, RowRange, row_set::cmp_start},
    row_store::Snapshot,
    table::TableData,
    util::Slice,
};

/// Lazy scan over a table as of the moment it was started.
///
/// Holds a [`Snapshot`] until dropped, so commits made while iterating are
/// never observed. Ranges are visited in key order and a row covered by
/// several of them is yielded once.
pub struct RowIterator {
    table: Arc<TableData>,
    snapshot: Snapshot,
    ranges: Vec<RowRange>,
    range_idx: usize,
    /// Last row key examined
    cursor: Option<Slice>,
    filter: Option<RowFilter>,
    remaining: Option<usize>,
}

impl RowIterator {
    pub(crate) fn new(
        table: Arc<TableData>,
        snapshot: Snapshot,
        ranges: Vec<RowRange>,
        filter: Option<RowFilter>,
        limit: Option<usize>,
    ) -> Self {
        RowIterator {
            table,
            snapshot,
            ranges,
            range_idx: 0,
            cursor: None,
            filter,
            remaining: limit,
        }
    }

    /// Sequence of the snapshot the scan reads.
    pub fn sequence(&self) -> u64 {
        self.snapshot.sequence()
    }

    /// Where to resume within `range`: its start, or just past the cursor if
    /// that is further along.
    fn seek_from<'a>(range: &'a RowRange, cursor: Option<&'a Slice>) -> Bound<&'a Slice> {
        let start = range.start.as_ref();
        match cursor {
            None => start,
            Some(last) => match cmp_start(start, Bound::Excluded(last)) {
                Ordering::Greater => start,
                _ => Bound::Excluded(last),
            },
        }
    }
}

impl Iterator for RowIterator {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.remaining == Some(0) {
            return None;
        }

        while let Some(range) = self.ranges.get(self.range_idx) {
            let from = Self::seek_from(range, self.cursor.as_ref());
            let Some((row_key, image)) = self.table.next_visible(from, &self.snapshot) else {
                // nothing visible past this point in any range
                self.range_idx = self.ranges.len();
                break;
            };
            if !range.before_end(&row_key) {
                self.range_idx += 1;
                continue;
            }

            self.cursor = Some(row_key.clone());
            if let Some(row) = self
                .table
                .materialize(&row_key, &image, self.filter.as_ref())
            {
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                }
                return Some(row);
            }
        }
        None
    }
}
