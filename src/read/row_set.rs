use std::{cmp::Ordering, ops::Bound};

use crate::util::Slice;

/// A range of row keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRange {
    pub start: Bound<Slice>,
    pub end: Bound<Slice>,
}

impl RowRange {
    pub fn new(start: Bound<Slice>, end: Bound<Slice>) -> Self {
        RowRange { start, end }
    }

    /// Every row key.
    pub fn all() -> Self {
        RowRange::new(Bound::Unbounded, Bound::Unbounded)
    }

    /// `[start, end)`; `None` leaves that side unbounded.
    pub fn closed_open(start: Option<Slice>, end: Option<Slice>) -> Self {
        RowRange::new(
            start.map_or(Bound::Unbounded, Bound::Included),
            end.map_or(Bound::Unbounded, Bound::Excluded),
        )
    }

    /// Exactly one row key.
    pub fn single(key: Slice) -> Self {
        RowRange::new(Bound::Included(key.clone()), Bound::Included(key))
    }

    /// Every key starting with `prefix`.
    pub fn prefix(prefix: &[u8]) -> Self {
        let start = Bound::Included(Slice::from(prefix));
        let end = match prefix_successor(prefix) {
            Some(successor) => Bound::Excluded(Slice::from(successor)),
            None => Bound::Unbounded,
        };
        RowRange::new(start, end)
    }

    pub fn contains(&self, key: &Slice) -> bool {
        let after_start = match &self.start {
            Bound::Included(start) => key >= start,
            Bound::Excluded(start) => key > start,
            Bound::Unbounded => true,
        };
        after_start && self.before_end(key)
    }

    /// Whether `key` is not past the end of the range.
    pub fn before_end(&self, key: &Slice) -> bool {
        match &self.end {
            Bound::Included(end) => key <= end,
            Bound::Excluded(end) => key < end,
            Bound::Unbounded => true,
        }
    }
}

/// Smallest key greater than every key with `prefix`, if any.
fn prefix_successor(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut successor = prefix.to_vec();
    while let Some(last) = successor.pop() {
        if last < 0xff {
            successor.push(last + 1);
            return Some(successor);
        }
    }
    None
}

/// Order two start bounds by the first key they admit.
pub(crate) fn cmp_start(a: Bound<&Slice>, b: Bound<&Slice>) -> Ordering {
    match (a, b) {
        (Bound::Unbounded, Bound::Unbounded) => Ordering::Equal,
        (Bound::Unbounded, _) => Ordering::Less,
        (_, Bound::Unbounded) => Ordering::Greater,
        (Bound::Included(x), Bound::Included(y)) | (Bound::Excluded(x), Bound::Excluded(y)) => x.cmp(y),
        (Bound::Included(x), Bound::Excluded(y)) => x.cmp(y).then(Ordering::Less),
        (Bound::Excluded(x), Bound::Included(y)) => x.cmp(y).then(Ordering::Greater),
    }
}

/// Explicit row keys and key ranges to read.
///
/// Rows covered by several entries are returned once; an empty set reads the
/// whole table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSet {
    pub row_keys: Vec<Slice>,
    pub row_ranges: Vec<RowRange>,
}

impl RowSet {
    pub fn new() -> Self {
        RowSet::default()
    }

    pub fn add_row_key(&mut self, key: impl Into<Slice>) -> &mut Self {
        self.row_keys.push(key.into());
        self
    }

    pub fn add_row_range(&mut self, range: RowRange) -> &mut Self {
        self.row_ranges.push(range);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.row_keys.is_empty() && self.row_ranges.is_empty()
    }

    /// All entries as ranges, ordered by start.
    pub(crate) fn to_ranges(&self) -> Vec<RowRange> {
        let mut ranges: Vec<RowRange> = self
            .row_keys
            .iter()
            .cloned()
            .map(RowRange::single)
            .chain(self.row_ranges.iter().cloned())
            .collect();
        ranges.sort_by(|a, b| cmp_start(a.start.as_ref(), b.start.as_ref()));
        ranges
    }
}
