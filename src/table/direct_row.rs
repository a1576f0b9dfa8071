use crate::{
    cell::TimestampRange,
    mutation::{Mutation, MutationBatch},
    table::Table,
    util::{Result, Slice, Status},
};

/// Row with mutations staged for an unconditional commit.
///
/// Nothing reaches the table until [`DirectRow::commit`] or
/// [`Table::mutate_rows`]; the staged mutations then apply atomically, in
/// the order they were staged.
///
/// ```ignore
/// let mut row = table.direct_row("k1");
/// row.set_cell("cf1", "c1", "v1").delete_cell("cf1", "old");
/// let status = row.commit()?;
/// assert!(status.is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct DirectRow {
    table: Table,
    row_key: Slice,
    batch: MutationBatch,
}

impl DirectRow {
    pub(crate) fn new(table: Table, row_key: Slice) -> Self {
        DirectRow {
            table,
            row_key,
            batch: MutationBatch::new(),
        }
    }

    pub fn row_key(&self) -> &Slice {
        &self.row_key
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Stage a write stamped with the server's time at commit.
    pub fn set_cell(&mut self, family: &str, qualifier: impl Into<Slice>, value: impl Into<Slice>) -> &mut Self {
        self.batch
            .set_cell(family, qualifier.into(), value.into(), None);
        self
    }

    /// Stage a write at an explicit timestamp, in microseconds. It must be a
    /// whole number of milliseconds.
    pub fn set_cell_at(
        &mut self,
        family: &str,
        qualifier: impl Into<Slice>,
        value: impl Into<Slice>,
        timestamp_micros: i64,
    ) -> &mut Self {
        self.batch.set_cell(
            family,
            qualifier.into(),
            value.into(),
            Some(timestamp_micros),
        );
        self
    }

    /// Stage deletion of every version of a column.
    pub fn delete_cell(&mut self, family: &str, qualifier: impl Into<Slice>) -> &mut Self {
        self.delete_cells_in_range(family, qualifier, TimestampRange::all())
    }

    pub fn delete_cells_in_range(
        &mut self,
        family: &str,
        qualifier: impl Into<Slice>,
        time_range: TimestampRange,
    ) -> &mut Self {
        self.batch
            .delete_cells(family, qualifier.into(), time_range);
        self
    }

    pub fn delete_family(&mut self, family: &str) -> &mut Self {
        self.batch.delete_family(family);
        self
    }

    /// Stage deletion of the whole row.
    pub fn delete(&mut self) -> &mut Self {
        self.batch.delete_row();
        self
    }

    pub fn mutations(&self) -> &[Mutation] {
        self.batch.mutations()
    }

    pub fn mutation_count(&self) -> usize {
        self.batch.count()
    }

    /// Approximate staged payload in bytes.
    pub fn data_size(&self) -> usize {
        self.batch.data_size()
    }

    pub fn clear(&mut self) {
        self.batch.clear();
    }

    /// Commit the staged mutations and clear them.
    ///
    /// A row rejected for its content (unknown family, bad timestamp,
    /// oversized value) comes back as a non-OK status; only a missing table
    /// or an invalid row key is an `Err`.
    pub fn commit(&mut self) -> Result<Status> {
        let data = self.table.data()?;
        data.validate_row_key(&self.row_key)?;
        let status = data.mutate_row(&self.row_key, self.batch.mutations());
        self.clear();
        Ok(status)
    }
}
