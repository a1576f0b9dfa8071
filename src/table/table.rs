use std::{collections::BTreeMap, sync::Arc};

use crate::{
    client::InstanceData,
    column_family::{ColumnFamily, ColumnFamilyDescriptor},
    filter::RowFilter,
    gc::GcRule,
    read::{ReadRowsOptions, Row, RowIterator, RowRange},
    table::{AppendRow, ConditionalRow, DirectRow, TableData},
    util::{Result, Slice, Status},
};

/// Handle to a table of an instance.
///
/// Cheap to clone. The handle holds only the table id; every call looks the
/// table up, so a handle to a table that was deleted reports NotFound.
#[derive(Clone)]
pub struct Table {
    instance: Arc<InstanceData>,
    table_id: String,
}

impl Table {
    pub(crate) fn new(instance: Arc<InstanceData>, table_id: String) -> Self {
        Table { instance, table_id }
    }

    pub(crate) fn data(&self) -> Result<Arc<TableData>> {
        self.instance.table(&self.table_id)
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    /// Fully qualified name, `projects/<p>/instances/<i>/tables/<t>`.
    pub fn name(&self) -> String {
        self.instance.table_name(&self.table_id)
    }

    pub fn exists(&self) -> bool {
        self.instance.contains(&self.table_id)
    }

    /// Create the table with the given families.
    ///
    /// ```ignore
    /// table.create([("cf1", GcRule::max_versions(1)), ("cf2", GcRule::None)])?;
    /// ```
    pub fn create<I, D>(&self, families: I) -> Result<()>
    where
        I: IntoIterator<Item = D>,
        D: Into<ColumnFamilyDescriptor>,
    {
        let descriptors: Vec<ColumnFamilyDescriptor> = families.into_iter().map(Into::into).collect();
        self.create_with_descriptors(&descriptors)
    }

    pub fn create_with_descriptors(&self, families: &[ColumnFamilyDescriptor]) -> Result<()> {
        self.instance.create_table(&self.table_id, families)
    }

    pub fn delete(&self) -> Result<()> {
        self.instance.delete_table(&self.table_id)
    }

    /// Handle to a family of this table; see [`ColumnFamily`].
    pub fn column_family(&self, id: impl Into<String>, gc_rule: GcRule) -> ColumnFamily {
        ColumnFamily::new(self.clone(), id.into(), gc_rule)
    }

    pub fn list_column_families(&self) -> Result<BTreeMap<String, ColumnFamily>> {
        Ok(self
            .data()?
            .list_families()
            .into_iter()
            .map(|(id, rule)| (id.clone(), self.column_family(id, rule)))
            .collect())
    }

    pub fn direct_row(&self, row_key: impl Into<Slice>) -> DirectRow {
        DirectRow::new(self.clone(), row_key.into())
    }

    /// Row whose mutations depend on `filter` matching; see [`ConditionalRow`].
    pub fn conditional_row(&self, row_key: impl Into<Slice>, filter: RowFilter) -> ConditionalRow {
        ConditionalRow::new(self.clone(), row_key.into(), filter)
    }

    pub fn append_row(&self, row_key: impl Into<Slice>) -> AppendRow {
        AppendRow::new(self.clone(), row_key.into())
    }

    /// Read one row; `None` if it is absent or no cell survives `filter`.
    pub fn read_row(&self, row_key: impl Into<Slice>, filter: Option<&RowFilter>) -> Result<Option<Row>> {
        self.data()?.read_row(&row_key.into(), filter)
    }

    /// Lazily scan rows in key order; see [`ReadRowsOptions`].
    pub fn read_rows(&self, options: ReadRowsOptions) -> Result<RowIterator> {
        self.data()?.read_rows(options)
    }

    /// Commit several staged rows; one status per row, in input order.
    ///
    /// A row failing validation does not affect the others. An empty or
    /// oversized row key fails the whole call before any row is applied.
    pub fn mutate_rows(&self, rows: &[DirectRow]) -> Result<Vec<Status>> {
        self.data()?
            .mutate_rows(rows.iter().map(|row| (row.row_key(), row.mutations())))
    }

    /// Delete every row.
    pub fn truncate(&self) -> Result<()> {
        self.data()?.drop_row_range(&RowRange::all());
        Ok(())
    }

    /// Delete every row whose key starts with `prefix`. Returns the number
    /// of rows removed.
    pub fn drop_by_prefix(&self, prefix: impl AsRef<[u8]>) -> Result<usize> {
        let prefix = prefix.as_ref();
        if prefix.is_empty() {
            return Err(Status::invalid_argument("row key prefix must not be empty"));
        }
        Ok(self.data()?.drop_row_range(&RowRange::prefix(prefix)))
    }

    /// Evict every cell the families' GC rules no longer retain. Returns the
    /// number of cells evicted.
    pub fn garbage_collect(&self) -> Result<usize> {
        Ok(self.data()?.garbage_collect())
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name())
            .finish()
    }
}
