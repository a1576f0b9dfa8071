use std::cmp::Ordering;

use crate::util::Slice;

/// Key of one row image in the row index: the row key plus the sequence
/// number of the commit that produced the image.
///
/// Orders by row key ascending, then by sequence descending, so that all
/// images of a row are adjacent and the newest comes first. Seeking to
/// `(row_key, seq)` therefore lands on the newest image visible at `seq`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalKey {
    row_key: Slice,
    sequence: u64,
}

impl InternalKey {
    pub fn new(row_key: Slice, sequence: u64) -> Self {
        InternalKey { row_key, sequence }
    }

    /// Position just past every image of `row_key`.
    ///
    /// Published sequences start at 1, so no stored key uses sequence 0.
    pub fn after_all(row_key: Slice) -> Self {
        InternalKey {
            row_key,
            sequence: 0,
        }
    }

    pub fn row_key(&self) -> &Slice {
        &self.row_key
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl PartialOrd for InternalKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InternalKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row_key
            .cmp(&other.row_key)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}
