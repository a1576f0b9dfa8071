use std::{collections::BTreeMap, sync::Arc};

use parking_lot::Mutex;

/// Snapshot provides a consistent point-in-time view of a table
///
/// Reads and scans pin a snapshot for their whole lifetime; row images
/// published after it are invisible to them, and images it can still see
/// are not pruned until it is dropped.
pub struct Snapshot {
    /// Sequence number at snapshot creation
    sequence: u64,
    /// Unregisters the snapshot on drop
    list: Arc<SnapshotList>,
}

impl Snapshot {
    /// Get the snapshot's sequence number
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl Clone for Snapshot {
    fn clone(&self) -> Self {
        self.list.register(self.sequence);
        Snapshot {
            sequence: self.sequence,
            list: Arc::clone(&self.list),
        }
    }
}

impl Drop for Snapshot {
    fn drop(&mut self) {
        self.list.release(self.sequence);
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("sequence", &self.sequence)
            .finish()
    }
}

/// Live snapshots of one row store, counted per sequence.
#[derive(Debug, Default)]
pub struct SnapshotList {
    live: Mutex<BTreeMap<u64, usize>>,
}

impl SnapshotList {
    pub fn new() -> Self {
        SnapshotList::default()
    }

    /// Take a snapshot at the sequence returned by `current`.
    ///
    /// `current` runs under the list lock, so a pruner consulting the list
    /// either sees this snapshot or ran before its sequence was read.
    pub fn acquire(self: &Arc<Self>, current: impl FnOnce() -> u64) -> Snapshot {
        let mut live = self.live.lock();
        let sequence = current();
        *live.entry(sequence).or_insert(0) += 1;
        drop(live);

        Snapshot {
            sequence,
            list: Arc::clone(self),
        }
    }

    /// Oldest sequence still pinned by a snapshot.
    pub fn oldest(&self) -> Option<u64> {
        self.live.lock().keys().next().copied()
    }

    /// Whether a live snapshot has a sequence in `[low, high)`.
    pub fn any_in(&self, low: u64, high: u64) -> bool {
        low < high && self.live.lock().range(low..high).next().is_some()
    }

    pub fn count(&self) -> usize {
        self.live.lock().values().sum()
    }

    fn register(&self, sequence: u64) {
        *self.live.lock().entry(sequence).or_insert(0) += 1;
    }

    fn release(&self, sequence: u64) {
        let mut live = self.live.lock();
        if let Some(count) = live.get_mut(&sequence) {
            *count -= 1;
            if *count == 0 {
                live.remove(&sequence);
            }
        }
    }
}
