use std::{collections::BTreeMap, sync::Arc};

use parking_lot::RwLock;
use tracing::info;

use crate::{
    client::EmulatorOptions,
    column_family::ColumnFamilyDescriptor,
    statistics::Statistics,
    table::{Table, TableData},
    util::{Result, Status, validate_identifier},
};

/// Longest accepted table id, in bytes.
pub const MAX_TABLE_ID_LEN: usize = 50;

/// Check a table id against the service's naming rules.
pub fn validate_table_id(id: &str) -> Result<()> {
    validate_identifier("table", id, MAX_TABLE_ID_LEN)
}

/// Catalog of one instance: its tables by id.
pub(crate) struct InstanceData {
    project: String,
    instance_id: String,
    tables: RwLock<BTreeMap<String, Arc<TableData>>>,
    options: Arc<EmulatorOptions>,
    stats: Arc<Statistics>,
}

impl InstanceData {
    pub fn new(
        project: String,
        instance_id: String,
        options: Arc<EmulatorOptions>,
        stats: Arc<Statistics>,
    ) -> Self {
        InstanceData {
            project,
            instance_id,
            tables: RwLock::new(BTreeMap::new()),
            options,
            stats,
        }
    }

    pub fn name(&self) -> String {
        format!("projects/{}/instances/{}", self.project, self.instance_id)
    }

    pub fn table_name(&self, table_id: &str) -> String {
        format!("{}/tables/{}", self.name(), table_id)
    }

    pub fn table(&self, table_id: &str) -> Result<Arc<TableData>> {
        self.tables
            .read()
            .get(table_id)
            .cloned()
            .ok_or_else(|| Status::not_found(format!("table \"{}\" not found", self.table_name(table_id))))
    }

    pub fn contains(&self, table_id: &str) -> bool {
        self.tables.read().contains_key(table_id)
    }

    pub fn create_table(&self, table_id: &str, families: &[ColumnFamilyDescriptor]) -> Result<()> {
        validate_table_id(table_id)?;
        let name = self.table_name(table_id);
        let data = TableData::new(
            name.clone(),
            families,
            Arc::clone(&self.options),
            Arc::clone(&self.stats),
        )?;

        let mut tables = self.tables.write();
        if tables.contains_key(table_id) {
            return Err(Status::already_exists(format!("table \"{name}\" already exists")));
        }
        tables.insert(table_id.to_string(), Arc::new(data));
        drop(tables);

        self.stats.record_table_created();
        info!(table = %name, families = families.len(), "table created");
        Ok(())
    }

    pub fn delete_table(&self, table_id: &str) -> Result<()> {
        match self.tables.write().remove(table_id) {
            Some(data) => {
                self.stats.record_table_deleted();
                info!(table = %data.name(), "table deleted");
                Ok(())
            },
            None => Err(Status::not_found(format!(
                "table \"{}\" not found",
                self.table_name(table_id)
            ))),
        }
    }

    pub fn table_ids(&self) -> Vec<String> {
        self.tables.read().keys().cloned().collect()
    }

    fn all_tables(&self) -> Vec<Arc<TableData>> {
        self.tables.read().values().cloned().collect()
    }
}

/// Handle to an instance. Cheap to clone; clones share the same tables.
#[derive(Clone)]
pub struct Instance {
    data: Arc<InstanceData>,
}

impl Instance {
    pub(crate) fn new(data: Arc<InstanceData>) -> Self {
        Instance { data }
    }

    pub fn instance_id(&self) -> &str {
        &self.data.instance_id
    }

    pub fn project(&self) -> &str {
        &self.data.project
    }

    /// Fully qualified name, `projects/<p>/instances/<i>`.
    pub fn name(&self) -> String {
        self.data.name()
    }

    /// Handle to a table of this instance. The table need not exist yet.
    pub fn table(&self, table_id: impl Into<String>) -> Table {
        Table::new(Arc::clone(&self.data), table_id.into())
    }

    /// Every existing table, ordered by id.
    pub fn list_tables(&self) -> Vec<Table> {
        self.data
            .table_ids()
            .into_iter()
            .map(|id| self.table(id))
            .collect()
    }

    /// Sweep every table under its families' GC rules. Returns the number
    /// of cells evicted.
    pub fn garbage_collect(&self) -> usize {
        self.data
            .all_tables()
            .iter()
            .map(|table| table.garbage_collect())
            .sum()
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("name", &self.name())
            .finish()
    }
}
