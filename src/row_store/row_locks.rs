use std::hash::{BuildHasher, RandomState};

use parking_lot::{Mutex, MutexGuard};

/// Striped per-row commit locks.
///
/// A row commit holds the stripe of its row key, so commits to rows on
/// different stripes run in parallel. Operations that rewrite many rows take
/// every stripe, always in index order.
pub struct RowLocks {
    stripes: Vec<Mutex<()>>,
    hasher: RandomState,
}

impl RowLocks {
    pub fn new(stripes: usize) -> Self {
        RowLocks {
            stripes: (0..stripes.max(1)).map(|_| Mutex::new(())).collect(),
            hasher: RandomState::new(),
        }
    }

    pub fn lock(&self, row_key: &[u8]) -> MutexGuard<'_, ()> {
        let idx = (self.hasher.hash_one(row_key) as usize) % self.stripes.len();
        self.stripes[idx].lock()
    }

    pub fn lock_all(&self) -> Vec<MutexGuard<'_, ()>> {
        self.stripes.iter().map(Mutex::lock).collect()
    }

    pub fn stripe_count(&self) -> usize {
        self.stripes.len()
    }
}
