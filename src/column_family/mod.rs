/// Column Family module
///
/// A column family groups the columns of a table under one garbage
/// collection rule. Families are declared up front, in bulk when the table is
/// created or one at a time afterwards; a mutation naming an undeclared
/// family is rejected before it touches the row.
///
/// # Architecture
///
/// ```text
/// Table
///  ├─→ ColumnFamilySet
///  │    ├─→ "cf1"     → MaxVersions(1)
///  │    └─→ "history" → Union[MaxVersions(10), MaxAge(30d)]
///  └─→ RowStore
///       └─→ row → family → qualifier → versions
/// ```
///
/// # Usage
///
/// ```ignore
/// use fakebigtable::{Client, GcRule};
///
/// let table = Client::new("p").instance("i").table("t");
/// table.create([("cf1", GcRule::max_versions(1))])?;
///
/// // Add another family later
/// table.column_family("history", GcRule::max_versions(10)).create()?;
/// ```
pub mod column_family_descriptor;
pub mod column_family_handle;
mod column_family_set;

pub use column_family_descriptor::ColumnFamilyDescriptor;
pub use column_family_handle::ColumnFamily;
pub(crate) use column_family_set::ColumnFamilySet;

use crate::util::{Result, validate_identifier};

/// Longest accepted family id, in bytes.
pub const MAX_FAMILY_ID_LEN: usize = 64;

/// Check a family id against the service's naming rules.
pub fn validate_family_id(id: &str) -> Result<()> {
    validate_identifier("column family", id, MAX_FAMILY_ID_LEN)
}
