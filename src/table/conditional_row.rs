use crate::{
    cell::TimestampRange,
    filter::RowFilter,
    mutation::MutationBatch,
    table::Table,
    util::{Result, Slice},
};

/// Row with two sets of staged mutations, chosen at commit by whether a
/// predicate filter yields any cell of the row.
///
/// Every staging method takes `state`: `true` stages into the set applied
/// when the predicate matches, `false` into the other one.
///
/// ```ignore
/// let mut row = table.conditional_row("k1", RowFilter::value_regex("pending")?);
/// row.set_cell("cf1", "status", "done", true);
/// row.set_cell("cf1", "status", "skipped", false);
/// let matched = row.commit()?;
/// ```
#[derive(Debug, Clone)]
pub struct ConditionalRow {
    table: Table,
    row_key: Slice,
    predicate: RowFilter,
    true_batch: MutationBatch,
    false_batch: MutationBatch,
}

impl ConditionalRow {
    pub(crate) fn new(table: Table, row_key: Slice, predicate: RowFilter) -> Self {
        ConditionalRow {
            table,
            row_key,
            predicate,
            true_batch: MutationBatch::new(),
            false_batch: MutationBatch::new(),
        }
    }

    pub fn row_key(&self) -> &Slice {
        &self.row_key
    }

    fn batch(&mut self, state: bool) -> &mut MutationBatch {
        if state {
            &mut self.true_batch
        } else {
            &mut self.false_batch
        }
    }

    pub fn set_cell(
        &mut self,
        family: &str,
        qualifier: impl Into<Slice>,
        value: impl Into<Slice>,
        state: bool,
    ) -> &mut Self {
        self.batch(state)
            .set_cell(family, qualifier.into(), value.into(), None);
        self
    }

    pub fn set_cell_at(
        &mut self,
        family: &str,
        qualifier: impl Into<Slice>,
        value: impl Into<Slice>,
        timestamp_micros: i64,
        state: bool,
    ) -> &mut Self {
        self.batch(state).set_cell(
            family,
            qualifier.into(),
            value.into(),
            Some(timestamp_micros),
        );
        self
    }

    pub fn delete_cell(&mut self, family: &str, qualifier: impl Into<Slice>, state: bool) -> &mut Self {
        self.batch(state)
            .delete_cells(family, qualifier.into(), TimestampRange::all());
        self
    }

    pub fn delete_cells_in_range(
        &mut self,
        family: &str,
        qualifier: impl Into<Slice>,
        time_range: TimestampRange,
        state: bool,
    ) -> &mut Self {
        self.batch(state)
            .delete_cells(family, qualifier.into(), time_range);
        self
    }

    pub fn delete_family(&mut self, family: &str, state: bool) -> &mut Self {
        self.batch(state).delete_family(family);
        self
    }

    pub fn delete(&mut self, state: bool) -> &mut Self {
        self.batch(state).delete_row();
        self
    }

    pub fn clear(&mut self) {
        self.true_batch.clear();
        self.false_batch.clear();
    }

    /// Evaluate the predicate and apply the matching set atomically, then
    /// clear both sets. Returns whether the predicate matched.
    pub fn commit(&mut self) -> Result<bool> {
        let matched = self.table.data()?.check_and_mutate_row(
            &self.row_key,
            &self.predicate,
            self.true_batch.mutations(),
            self.false_batch.mutations(),
        )?;
        self.clear();
        Ok(matched)
    }
}
