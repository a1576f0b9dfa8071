use crate::{column_family::ColumnFamilyDescriptor, gc::GcRule, table::Table, util::Result};

/// Handle to a column family of a table
///
/// Pairs a family id with a GC rule. Creating the handle changes nothing;
/// `create`, `update` and `delete` apply it to the table.
///
/// # Example
///
/// ```ignore
/// use fakebigtable::GcRule;
///
/// let cf = table.column_family("history", GcRule::max_versions(10));
/// cf.create()?;
///
/// // Tighten retention; existing cells are swept under the new rule
/// table.column_family("history", GcRule::max_versions(2)).update()?;
/// ```
#[derive(Debug, Clone)]
pub struct ColumnFamily {
    table: Table,
    id: String,
    gc_rule: GcRule,
}

impl ColumnFamily {
    pub(crate) fn new(table: Table, id: String, gc_rule: GcRule) -> Self {
        ColumnFamily { table, id, gc_rule }
    }

    /// Get the column family id
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn gc_rule(&self) -> &GcRule {
        &self.gc_rule
    }

    pub fn to_descriptor(&self) -> ColumnFamilyDescriptor {
        ColumnFamilyDescriptor::new(self.id.clone(), self.gc_rule.clone())
    }

    /// Add the family to the table.
    pub fn create(&self) -> Result<()> {
        self.table.data()?.create_family(&self.id, self.gc_rule.clone())
    }

    /// Replace the family's rule with this handle's.
    pub fn update(&self) -> Result<()> {
        self.table.data()?.update_family(&self.id, self.gc_rule.clone())
    }

    /// Drop the family and every cell stored in it.
    pub fn delete(&self) -> Result<()> {
        self.table.data()?.delete_family(&self.id)
    }
}

impl PartialEq for ColumnFamily {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.gc_rule == other.gc_rule && self.table.name() == other.table.name()
    }
}

impl Eq for ColumnFamily {}
