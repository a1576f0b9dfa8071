use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::{
    column_family::{ColumnFamilyDescriptor, validate_family_id},
    gc::GcRule,
    util::{Result, Status},
};

/// Column family registry of one table
///
/// ColumnFamilySet maps family id → GC rule. Mutations resolve every family
/// they name through it before touching any cell.
///
/// # Thread Safety
///
/// The map sits behind a RwLock:
/// - Reads (resolve, list) use the read lock
/// - Writes (create, update, drop) use the write lock
///
/// Callers that must keep the family set stable across a whole row commit
/// hold the table's row lock; schema changes that rewrite rows take every
/// row lock first.
#[derive(Debug, Default)]
pub struct ColumnFamilySet {
    families: RwLock<BTreeMap<String, GcRule>>,
}

impl ColumnFamilySet {
    /// Build a set from descriptors, all or nothing.
    pub fn from_descriptors(descriptors: &[ColumnFamilyDescriptor]) -> Result<Self> {
        let mut families = BTreeMap::new();
        for descriptor in descriptors {
            validate_family_id(&descriptor.name)?;
            descriptor.gc_rule.validate()?;
            if families
                .insert(descriptor.name.clone(), descriptor.gc_rule.clone())
                .is_some()
            {
                return Err(Status::invalid_argument(format!(
                    "column family \"{}\" specified more than once",
                    descriptor.name
                )));
            }
        }

        Ok(ColumnFamilySet {
            families: RwLock::new(families),
        })
    }

    /// Look up the rule of `family`.
    pub fn resolve(&self, family: &str) -> Result<GcRule> {
        self.families
            .read()
            .get(family)
            .cloned()
            .ok_or_else(|| Status::not_found(format!("unknown family \"{family}\"")))
    }

    /// Create a new column family
    pub fn create_cf(&self, name: &str, gc_rule: GcRule) -> Result<()> {
        validate_family_id(name)?;
        gc_rule.validate()?;

        let mut families = self.families.write();
        if families.contains_key(name) {
            return Err(Status::already_exists(format!(
                "column family \"{name}\" already exists"
            )));
        }
        families.insert(name.to_string(), gc_rule);
        Ok(())
    }

    /// Replace the rule of an existing family.
    pub fn update_cf(&self, name: &str, gc_rule: GcRule) -> Result<()> {
        gc_rule.validate()?;

        let mut families = self.families.write();
        match families.get_mut(name) {
            Some(rule) => {
                *rule = gc_rule;
                Ok(())
            },
            None => Err(Status::not_found(format!(
                "column family \"{name}\" not found"
            ))),
        }
    }

    /// Drop a column family
    pub fn drop_cf(&self, name: &str) -> Result<()> {
        match self.families.write().remove(name) {
            Some(_) => Ok(()),
            None => Err(Status::not_found(format!(
                "column family \"{name}\" not found"
            ))),
        }
    }

    /// List all families with their rules, ordered by id.
    pub fn list_column_families(&self) -> BTreeMap<String, GcRule> {
        self.families.read().clone()
    }
}
