/// Row store
///
/// Maps row keys to immutable row images in byte-lexicographic key order.
/// Rows exist only while they hold cells: the first write inserts an image,
/// and publishing an empty image removes the row.
///
/// # Architecture
///
/// ```text
/// commit(row) ─→ RowLocks::lock(row)
///                  ↓
///             latest image ─→ clone ─→ apply mutations ─→ GC
///                  ↓
///             RowStore::publish ─→ SkipMap[(row, seq)] = image
///                  ↓
///             prune images no snapshot can see
/// ```
mod internal_key;
mod row_locks;
#[allow(clippy::module_inception)]
mod row_store;
mod snapshot;

pub use internal_key::InternalKey;
pub use row_locks::RowLocks;
pub use row_store::{RowImage, RowStore};
pub use snapshot::{Snapshot, SnapshotList};
