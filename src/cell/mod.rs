/// Cell store
///
/// The unit of truth of the emulator: per row, per column, an ordered set of
/// timestamped values.
///
/// ```text
/// RowData
///  ├─→ family "cf1"
///  │    ├─→ qualifier b"col1" → [ts=3000, ts=2000, ts=1000]
///  │    └─→ qualifier b"col2" → [ts=1000]
///  └─→ family "cf2"
///       └─→ ...
/// ```
///
/// Row images are never mutated once published; a commit clones the current
/// image, edits the copy and publishes it as a new version (see
/// [`crate::row_store`]).
#[allow(clippy::module_inception)]
mod cell;
mod row_data;

pub use cell::{Cell, TimestampRange};
pub use row_data::{ColumnMap, RowData};
