//! In-process emulator of a Bigtable-like wide-column store.
//!
//! Tables hold rows ordered by key; a row holds cells grouped by column
//! family and qualifier, each column keeping timestamped versions pruned by
//! its family's GC rule. Mutations of one row commit atomically, batched
//! commits report one status per row, and reads filter rows through a
//! composable [`RowFilter`].

pub mod cell;
pub mod client;
pub mod column_family;
pub mod filter;
pub mod gc;
pub mod mutation;
pub mod read;
pub mod row_store;
pub mod statistics;
pub mod table;
pub mod util;

pub use cell::{Cell, TimestampRange};
pub use client::{Client, EmulatorOptions, Instance};
pub use column_family::{ColumnFamily, ColumnFamilyDescriptor};
pub use filter::RowFilter;
pub use gc::GcRule;
pub use mutation::{Mutation, ReadModifyWriteRule};
pub use read::{ReadRowsOptions, Row, RowIterator, RowRange, RowSet};
pub use statistics::Statistics;
pub use table::{AppendRow, ConditionalRow, DirectRow, Table};
pub use util::{Code, Result, SERVER_TIMESTAMP, Slice, Status};
