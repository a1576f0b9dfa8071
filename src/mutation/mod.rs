/// Mutations
///
/// A [`Mutation`] is one staged change to a row. The mutations of one row in
/// one request form an atomic unit: they are validated together against the
/// table's column families, applied in order to a private copy of the row,
/// garbage collected, and only then published.
///
/// ```text
/// [SetCell, DeleteFromColumn, ...]
///     ↓ validate (families, timestamps, sizes)    ─→ Err: row unchanged
///     ↓ apply in order to a copy of the row image
///     ↓ GC every touched column
///     ↓ publish new image
/// ```
mod apply;
mod mutation_batch;
mod read_modify_write;

pub(crate) use apply::{MutationContext, apply_mutations};
pub(crate) use mutation_batch::MutationBatch;
pub use read_modify_write::ReadModifyWriteRule;
pub(crate) use read_modify_write::apply_rules;

use crate::{cell::TimestampRange, util::Slice};

/// One staged change to a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Write a value. `timestamp_micros` of [`crate::SERVER_TIMESTAMP`] asks
    /// the server to assign one.
    SetCell {
        family: String,
        qualifier: Slice,
        timestamp_micros: i64,
        value: Slice,
    },
    /// Remove the versions of one column within a time range.
    DeleteFromColumn {
        family: String,
        qualifier: Slice,
        time_range: TimestampRange,
    },
    /// Remove every cell of one family in the row.
    DeleteFromFamily { family: String },
    /// Remove every cell in the row.
    DeleteFromRow,
}

impl Mutation {
    /// Family the mutation targets, if any.
    pub fn family(&self) -> Option<&str> {
        match self {
            Mutation::SetCell { family, .. }
            | Mutation::DeleteFromColumn { family, .. }
            | Mutation::DeleteFromFamily { family } => Some(family),
            Mutation::DeleteFromRow => None,
        }
    }

    /// Approximate payload size in bytes.
    pub fn data_size(&self) -> usize {
        match self {
            Mutation::SetCell {
                family,
                qualifier,
                value,
                ..
            } => family.len() + qualifier.size() + value.size() + 8,
            Mutation::DeleteFromColumn {
                family, qualifier, ..
            } => family.len() + qualifier.size() + 16,
            Mutation::DeleteFromFamily { family } => family.len(),
            Mutation::DeleteFromRow => 0,
        }
    }
}
