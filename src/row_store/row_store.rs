use std::{
    ops::Bound,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use crossbeam_skiplist::SkipMap;
use parking_lot::Mutex;

use crate::{
    cell::RowData,
    row_store::{InternalKey, Snapshot, SnapshotList},
    util::Slice,
};

/// Immutable image of a row as published by one commit.
pub type RowImage = Arc<RowData>;

/// Multi-version ordered index of a table's rows.
///
/// Every commit publishes a complete new image of the row under a fresh
/// sequence number; `None` marks a row whose last cell was removed. Readers
/// pin a [`Snapshot`] and see, per row, the newest image at or below the
/// snapshot sequence, so a scan never observes half of a commit.
///
/// ```text
/// (b"a", seq 7) → Some(image)   ← visible at seq >= 7
/// (b"a", seq 3) → Some(image)   ← kept while a snapshot in [3, 7) lives
/// (b"b", seq 9) → None          ← row deleted at seq 9
/// (b"b", seq 2) → Some(image)
/// ```
///
/// Images that no live snapshot can observe any more are pruned right after
/// each publish.
pub struct RowStore {
    map: SkipMap<InternalKey, Option<RowImage>>,
    /// Highest sequence whose image is fully inserted
    published: AtomicU64,
    /// Serializes sequence allocation with insertion
    publish_lock: Mutex<()>,
    snapshots: Arc<SnapshotList>,
}

impl RowStore {
    pub fn new() -> Self {
        RowStore {
            map: SkipMap::new(),
            published: AtomicU64::new(0),
            publish_lock: Mutex::new(()),
            snapshots: Arc::new(SnapshotList::new()),
        }
    }

    /// Pin the current state of the store.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots
            .acquire(|| self.published.load(Ordering::Acquire))
    }

    pub fn last_sequence(&self) -> u64 {
        self.published.load(Ordering::Acquire)
    }

    /// Image of `row_key` visible at `snapshot`.
    pub fn get(&self, row_key: &Slice, snapshot: &Snapshot) -> Option<RowImage> {
        self.get_at(row_key, snapshot.sequence())
    }

    /// Newest image of `row_key`, including ones published after any
    /// snapshot. Callers hold the row's commit lock.
    pub fn latest(&self, row_key: &Slice) -> Option<RowImage> {
        self.get_at(row_key, u64::MAX)
    }

    fn get_at(&self, row_key: &Slice, sequence: u64) -> Option<RowImage> {
        let seek = InternalKey::new(row_key.clone(), sequence);
        let entry = self.map.lower_bound(Bound::Included(&seek))?;
        if entry.key().row_key() != row_key {
            return None;
        }
        entry.value().clone()
    }

    /// Publish a new image of one row. An empty image is stored as a
    /// deletion marker.
    pub fn publish(&self, row_key: Slice, image: RowData) -> u64 {
        self.publish_batch(vec![(row_key, image)])
    }

    /// Publish images of several rows under one sequence number.
    pub fn publish_batch(&self, images: Vec<(Slice, RowData)>) -> u64 {
        let mut keys = Vec::with_capacity(images.len());
        let seq = {
            let _guard = self.publish_lock.lock();
            let seq = self.published.load(Ordering::Relaxed) + 1;
            for (row_key, image) in images {
                let value = (!image.is_empty()).then(|| Arc::new(image));
                self.map.insert(InternalKey::new(row_key.clone(), seq), value);
                keys.push(row_key);
            }
            self.published.store(seq, Ordering::Release);
            seq
        };

        for row_key in &keys {
            self.prune(row_key);
        }
        seq
    }

    /// Drop images of `row_key` that no live snapshot can observe.
    ///
    /// The newest image always stays. An older image stays only while some
    /// snapshot falls between its sequence and the next newer one. Deletion
    /// markers with nothing older left behind them are dropped as well.
    fn prune(&self, row_key: &Slice) {
        let start = InternalKey::new(row_key.clone(), u64::MAX);
        let end = InternalKey::after_all(row_key.clone());
        let images: Vec<_> = self.map.range(start..end).collect();

        let mut keep: Vec<bool> = images
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                i == 0
                    || self
                        .snapshots
                        .any_in(entry.key().sequence(), images[i - 1].key().sequence())
            })
            .collect();

        for (i, entry) in images.iter().enumerate().rev() {
            if !keep[i] {
                continue;
            }
            if entry.value().is_some() {
                break;
            }
            keep[i] = false;
        }

        for (entry, keep) in images.iter().zip(keep) {
            if !keep {
                entry.remove();
            }
        }
    }

    /// First row at or after `from` that is present at `sequence`.
    pub fn next_visible(&self, from: Bound<&Slice>, sequence: u64) -> Option<(Slice, RowImage)> {
        let mut seek = match from {
            Bound::Included(key) => InternalKey::new(key.clone(), sequence),
            Bound::Excluded(key) => InternalKey::after_all(key.clone()),
            Bound::Unbounded => InternalKey::new(Slice::empty(), sequence),
        };

        loop {
            let entry = self.map.lower_bound(Bound::Included(&seek))?;
            let key = entry.key();
            if key.sequence() > sequence {
                // published after the snapshot; skip to the image it can see
                seek = InternalKey::new(key.row_key().clone(), sequence);
                continue;
            }
            match entry.value() {
                Some(image) => return Some((key.row_key().clone(), Arc::clone(image))),
                None => seek = InternalKey::after_all(key.row_key().clone()),
            }
        }
    }

    /// Keys of every row present at `sequence`, ascending.
    pub fn visible_keys(&self, sequence: u64) -> Vec<Slice> {
        let mut keys = Vec::new();
        let mut cursor: Option<Slice> = None;
        loop {
            let from = match &cursor {
                Some(key) => Bound::Excluded(key),
                None => Bound::Unbounded,
            };
            match self.next_visible(from, sequence) {
                Some((key, _)) => {
                    keys.push(key.clone());
                    cursor = Some(key);
                },
                None => return keys,
            }
        }
    }

    /// Number of stored images, including superseded ones.
    pub fn version_count(&self) -> usize {
        self.map.len()
    }

    pub fn live_snapshots(&self) -> usize {
        self.snapshots.count()
    }
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new()
    }
}
