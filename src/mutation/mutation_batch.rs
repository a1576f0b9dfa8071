use crate::{
    cell::TimestampRange,
    mutation::Mutation,
    util::{SERVER_TIMESTAMP, Slice},
};

/// MutationBatch accumulates the staged mutations of one row, in the order
/// they will be applied.
#[derive(Debug, Clone, Default)]
pub(crate) struct MutationBatch {
    ops: Vec<Mutation>,
    /// Approximate payload size in bytes
    data_size: usize,
}

impl MutationBatch {
    #[inline]
    pub fn new() -> Self {
        MutationBatch::default()
    }

    pub fn push(&mut self, mutation: Mutation) {
        self.data_size += mutation.data_size();
        self.ops.push(mutation);
    }

    /// Stage a cell write; `None` asks for a server-assigned timestamp.
    pub fn set_cell(&mut self, family: &str, qualifier: Slice, value: Slice, timestamp_micros: Option<i64>) {
        self.push(Mutation::SetCell {
            family: family.to_string(),
            qualifier,
            timestamp_micros: timestamp_micros.unwrap_or(SERVER_TIMESTAMP),
            value,
        });
    }

    pub fn delete_cells(&mut self, family: &str, qualifier: Slice, time_range: TimestampRange) {
        self.push(Mutation::DeleteFromColumn {
            family: family.to_string(),
            qualifier,
            time_range,
        });
    }

    pub fn delete_family(&mut self, family: &str) {
        self.push(Mutation::DeleteFromFamily {
            family: family.to_string(),
        });
    }

    pub fn delete_row(&mut self) {
        self.push(Mutation::DeleteFromRow);
    }

    #[inline]
    pub fn mutations(&self) -> &[Mutation] {
        &self.ops
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.ops.len()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
        self.data_size = 0;
    }

    #[inline]
    pub fn data_size(&self) -> usize {
        self.data_size
    }
}
