use std::{collections::BTreeMap, ops::Bound, sync::Arc};

use tracing::{debug, info, warn};

use crate::{
    cell::RowData,
    client::EmulatorOptions,
    column_family::{ColumnFamilyDescriptor, ColumnFamilySet},
    filter::RowFilter,
    gc::GcRule,
    mutation::{Mutation, MutationContext, ReadModifyWriteRule, apply_mutations, apply_rules},
    read::{ReadRowsOptions, Row, RowIterator, RowRange},
    row_store::{RowImage, RowLocks, RowStore, Snapshot},
    statistics::Statistics,
    util::{Result, ServerClock, Slice, Status, clock::now_micros},
};

/// State of one table: its families, its rows and the locks guarding commits.
///
/// Row commits lock the stripe of their row, copy the newest image, apply
/// and publish. Operations that rewrite many rows hold every stripe, so they
/// never interleave with a commit.
pub(crate) struct TableData {
    name: String,
    families: ColumnFamilySet,
    rows: RowStore,
    locks: RowLocks,
    clock: ServerClock,
    options: Arc<EmulatorOptions>,
    stats: Arc<Statistics>,
}

impl TableData {
    pub fn new(
        name: String,
        descriptors: &[ColumnFamilyDescriptor],
        options: Arc<EmulatorOptions>,
        stats: Arc<Statistics>,
    ) -> Result<Self> {
        Ok(TableData {
            name,
            families: ColumnFamilySet::from_descriptors(descriptors)?,
            rows: RowStore::new(),
            locks: RowLocks::new(options.row_lock_stripes),
            clock: ServerClock::new(),
            options,
            stats,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn ctx(&self) -> MutationContext<'_> {
        MutationContext {
            families: &self.families,
            clock: &self.clock,
            options: &self.options,
        }
    }

    /// Request-level check of a row key; failing it rejects the whole call.
    pub fn validate_row_key(&self, row_key: &Slice) -> Result<()> {
        if row_key.is_empty() {
            return Err(Status::invalid_argument("row key must not be empty"));
        }
        if row_key.size() > self.options.max_row_key_size {
            return Err(Status::invalid_argument(format!(
                "row key of {} bytes exceeds the limit of {} bytes",
                row_key.size(),
                self.options.max_row_key_size
            )));
        }
        Ok(())
    }

    fn latest_image(&self, row_key: &Slice) -> RowData {
        self.rows
            .latest(row_key)
            .map(|image| (*image).clone())
            .unwrap_or_default()
    }

    // Mutations

    /// Commit one row's mutations atomically and report the outcome.
    ///
    /// The row key must already be validated.
    pub fn mutate_row(&self, row_key: &Slice, mutations: &[Mutation]) -> Status {
        let status = match self.commit_row(row_key, mutations) {
            Ok(()) => Status::ok(),
            Err(status) => status,
        };
        if !status.is_ok() {
            warn!(
                table = %self.name,
                row_key = %row_key,
                code = status.code_number(),
                message = status.message(),
                "row mutation rejected"
            );
            self.stats.record_row_failure();
        }
        status
    }

    fn commit_row(&self, row_key: &Slice, mutations: &[Mutation]) -> Result<()> {
        if mutations.is_empty() {
            return Err(Status::invalid_argument("no mutations provided"));
        }

        let _guard = self.locks.lock(row_key.data());
        let mut image = self.latest_image(row_key);
        let applied = apply_mutations(&mut image, mutations, &self.ctx())?;
        self.rows.publish(row_key.clone(), image);

        let bytes = mutations.iter().map(Mutation::data_size).sum::<usize>();
        self.stats
            .record_row_mutation(applied.cells_written, bytes as u64);
        if applied.cells_evicted > 0 {
            self.stats.record_evicted(applied.cells_evicted);
        }
        Ok(())
    }

    /// Commit several rows, each independently, returning one status per row
    /// in input order.
    pub fn mutate_rows<'a, I>(&self, rows: I) -> Result<Vec<Status>>
    where I: IntoIterator<Item = (&'a Slice, &'a [Mutation])> {
        let rows: Vec<_> = rows.into_iter().collect();
        if rows.is_empty() {
            return Err(Status::invalid_argument("no rows provided"));
        }
        for (row_key, _) in &rows {
            self.validate_row_key(row_key)?;
        }

        Ok(rows
            .into_iter()
            .map(|(row_key, mutations)| self.mutate_row(row_key, mutations))
            .collect())
    }

    /// Apply `true_mutations` if `predicate` yields any cell of the row,
    /// `false_mutations` otherwise. [`RowFilter::PassAll`] matches any row
    /// that has a visible cell.
    ///
    /// Returns whether the predicate matched.
    pub fn check_and_mutate_row(
        &self,
        row_key: &Slice,
        predicate: &RowFilter,
        true_mutations: &[Mutation],
        false_mutations: &[Mutation],
    ) -> Result<bool> {
        self.validate_row_key(row_key)?;
        if true_mutations.is_empty() && false_mutations.is_empty() {
            return Err(Status::invalid_argument("no mutations provided"));
        }
        let ctx = self.ctx();
        ctx.resolve_all(
            true_mutations
                .iter()
                .chain(false_mutations)
                .filter_map(Mutation::family),
        )?;

        let _guard = self.locks.lock(row_key.data());
        let mut image = self.latest_image(row_key);
        let visible = self.visible(&image);
        let matched = predicate.matches(row_key, &visible);
        self.stats.record_check_and_mutate(matched);

        let mutations = if matched { true_mutations } else { false_mutations };
        if !mutations.is_empty() {
            let applied = apply_mutations(&mut image, mutations, &ctx)?;
            self.rows.publish(row_key.clone(), image);
            let bytes = mutations.iter().map(Mutation::data_size).sum::<usize>();
            self.stats
                .record_row_mutation(applied.cells_written, bytes as u64);
            if applied.cells_evicted > 0 {
                self.stats.record_evicted(applied.cells_evicted);
            }
        }
        Ok(matched)
    }

    /// Apply read-modify-write rules atomically; returns the new newest
    /// version of every touched column.
    pub fn read_modify_write_row(&self, row_key: &Slice, rules: &[ReadModifyWriteRule]) -> Result<Row> {
        self.validate_row_key(row_key)?;

        let _guard = self.locks.lock(row_key.data());
        let mut image = self.latest_image(row_key);
        let modified = apply_rules(&mut image, rules, &self.ctx())?;
        self.rows.publish(row_key.clone(), image);

        let bytes: usize = modified
            .families()
            .values()
            .flat_map(|columns| columns.values())
            .flatten()
            .map(|cell| cell.value().size())
            .sum();
        self.stats.record_read_modify_write();
        self.stats
            .record_row_mutation(modified.cell_count() as u64, bytes as u64);
        Ok(Row::new(row_key.clone(), modified))
    }

    // Reads

    /// Row data as readers see it: stored cells with every family's GC rule
    /// applied as of now.
    pub fn visible(&self, image: &RowData) -> RowData {
        let mut data = image.clone();
        let now = now_micros();
        for family in image.families().keys() {
            if let Ok(rule) = self.families.resolve(family) {
                data.gc_family(family, &rule, now);
            }
        }
        data
    }

    /// Filter a visible image into a read result; `None` if no cell survives.
    pub fn materialize(&self, row_key: &Slice, image: &RowImage, filter: Option<&RowFilter>) -> Option<Row> {
        self.stats.record_row_scanned();
        let data = self.visible(image);
        let data = match filter {
            Some(filter) => filter.evaluate(row_key, data),
            None => data,
        };
        if data.is_empty() {
            return None;
        }
        self.stats.record_row_read(data.cell_count() as u64);
        Some(Row::new(row_key.clone(), data))
    }

    pub fn read_row(&self, row_key: &Slice, filter: Option<&RowFilter>) -> Result<Option<Row>> {
        self.validate_row_key(row_key)?;
        let snapshot = self.rows.snapshot();
        Ok(self
            .rows
            .get(row_key, &snapshot)
            .and_then(|image| self.materialize(row_key, &image, filter)))
    }

    /// Start a lazy scan pinned to the current state of the table.
    pub fn read_rows(self: &Arc<Self>, options: ReadRowsOptions) -> Result<RowIterator> {
        let ranges = options.ranges()?;
        let limit = options.effective_limit();
        let snapshot = self.rows.snapshot();
        self.stats.record_scan_started();
        debug!(
            table = %self.name,
            ranges = ranges.len(),
            sequence = snapshot.sequence(),
            "scan started"
        );
        Ok(RowIterator::new(
            Arc::clone(self),
            snapshot,
            ranges,
            options.filter,
            limit,
        ))
    }

    pub fn next_visible(&self, from: Bound<&Slice>, snapshot: &Snapshot) -> Option<(Slice, RowImage)> {
        self.rows.next_visible(from, snapshot.sequence())
    }

    // Bulk rewrites

    /// Rewrite every stored row with `f`, publishing the changed ones under
    /// one sequence. Callers hold every row lock. Returns the sum of what `f`
    /// reported.
    fn rewrite_rows<F>(&self, range: &RowRange, mut f: F) -> usize
    where F: FnMut(&mut RowData) -> usize {
        let mut changed = Vec::new();
        let mut total = 0;
        let mut cursor = range.start.clone();
        while let Some((row_key, image)) = self.rows.next_visible(cursor.as_ref(), u64::MAX) {
            if !range.before_end(&row_key) {
                break;
            }
            let mut data = (*image).clone();
            let n = f(&mut data);
            if n > 0 {
                total += n;
                changed.push((row_key.clone(), data));
            }
            cursor = Bound::Excluded(row_key);
        }
        if !changed.is_empty() {
            self.rows.publish_batch(changed);
        }
        total
    }

    /// Delete every row in `range`. Returns the number of rows removed.
    pub fn drop_row_range(&self, range: &RowRange) -> usize {
        let _guards = self.locks.lock_all();
        let mut rows = 0;
        let cells = self.rewrite_rows(range, |data| {
            rows += 1;
            data.clear()
        });
        self.stats.record_cells_deleted(cells as u64);
        info!(table = %self.name, rows, cells, "dropped row range");
        rows
    }

    /// Evict every cell the family rules no longer retain. Returns the
    /// number of cells evicted.
    pub fn garbage_collect(&self) -> usize {
        let _guards = self.locks.lock_all();
        let rules = self.families.list_column_families();
        let now = now_micros();
        let evicted = self.rewrite_rows(&RowRange::all(), |data| {
            rules
                .iter()
                .map(|(family, rule)| data.gc_family(family, rule, now))
                .sum()
        });
        self.stats.record_gc(evicted as u64);
        debug!(table = %self.name, evicted, "garbage collected");
        evicted
    }

    // Column families

    pub fn create_family(&self, family: &str, gc_rule: GcRule) -> Result<()> {
        self.families.create_cf(family, gc_rule)?;
        info!(table = %self.name, family, "column family created");
        Ok(())
    }

    /// Replace a family's rule and sweep its cells under the new rule.
    pub fn update_family(&self, family: &str, gc_rule: GcRule) -> Result<()> {
        let _guards = self.locks.lock_all();
        self.families.update_cf(family, gc_rule.clone())?;
        let now = now_micros();
        let evicted = self.rewrite_rows(&RowRange::all(), |data| data.gc_family(family, &gc_rule, now));
        self.stats.record_gc(evicted as u64);
        info!(table = %self.name, family, evicted, "column family updated");
        Ok(())
    }

    /// Drop a family along with its cells in every row.
    pub fn delete_family(&self, family: &str) -> Result<()> {
        let _guards = self.locks.lock_all();
        self.families.drop_cf(family)?;
        let removed = self.rewrite_rows(&RowRange::all(), |data| data.delete_family(family));
        self.stats.record_cells_deleted(removed as u64);
        info!(table = %self.name, family, removed, "column family deleted");
        Ok(())
    }

    pub fn list_families(&self) -> BTreeMap<String, GcRule> {
        self.families.list_column_families()
    }

    /// Number of rows present right now.
    #[cfg(test)]
    pub fn row_count(&self) -> usize {
        self.rows.visible_keys(self.rows.last_sequence()).len()
    }
}
