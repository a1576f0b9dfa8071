use serde::{Deserialize, Serialize};

use crate::gc::GcRule;

/// Descriptor for creating a Column Family
///
/// Contains the family id and its garbage collection rule.
/// Used when creating a table with several families at once.
///
/// # Example
///
/// ```ignore
/// use fakebigtable::{ColumnFamilyDescriptor, GcRule};
///
/// let families = vec![
///     ColumnFamilyDescriptor::new("cf1", GcRule::max_versions(1)),
///     ColumnFamilyDescriptor::new("history", GcRule::max_versions(10)),
/// ];
///
/// table.create_with_descriptors(&families)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFamilyDescriptor {
    /// Id of the column family
    pub name: String,

    /// Retention rule for the family's cells
    #[serde(default)]
    pub gc_rule: GcRule,
}

impl ColumnFamilyDescriptor {
    /// Create a new column family descriptor
    pub fn new<S: Into<String>>(name: S, gc_rule: GcRule) -> Self {
        ColumnFamilyDescriptor {
            name: name.into(),
            gc_rule,
        }
    }
}

impl<S: Into<String>> From<(S, GcRule)> for ColumnFamilyDescriptor {
    fn from((name, gc_rule): (S, GcRule)) -> Self {
        ColumnFamilyDescriptor::new(name, gc_rule)
    }
}
