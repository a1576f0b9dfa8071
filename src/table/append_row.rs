use crate::{
    mutation::ReadModifyWriteRule,
    read::Row,
    table::Table,
    util::{Result, Slice},
};

/// Row with staged read-modify-write rules.
///
/// ```ignore
/// let mut row = table.append_row("counter");
/// row.increment_cell_value("cf1", "hits", 1);
/// let updated = row.commit()?;
/// let hits = i64::from_be_bytes(updated.cell_value("cf1", "hits").unwrap().data().try_into()?);
/// ```
#[derive(Debug, Clone)]
pub struct AppendRow {
    table: Table,
    row_key: Slice,
    rules: Vec<ReadModifyWriteRule>,
}

impl AppendRow {
    pub(crate) fn new(table: Table, row_key: Slice) -> Self {
        AppendRow {
            table,
            row_key,
            rules: Vec::new(),
        }
    }

    pub fn row_key(&self) -> &Slice {
        &self.row_key
    }

    /// Append bytes to the newest value of a column.
    pub fn append_cell_value(
        &mut self,
        family: &str,
        qualifier: impl Into<Slice>,
        value: impl Into<Slice>,
    ) -> &mut Self {
        self.rules.push(ReadModifyWriteRule::Append {
            family: family.to_string(),
            qualifier: qualifier.into(),
            value: value.into(),
        });
        self
    }

    /// Add to the newest value of a column, read as a 64-bit big-endian
    /// signed integer.
    pub fn increment_cell_value(&mut self, family: &str, qualifier: impl Into<Slice>, delta: i64) -> &mut Self {
        self.rules.push(ReadModifyWriteRule::Increment {
            family: family.to_string(),
            qualifier: qualifier.into(),
            delta,
        });
        self
    }

    pub fn rules(&self) -> &[ReadModifyWriteRule] {
        &self.rules
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Apply the rules atomically and clear them. Returns the new newest
    /// cell of every modified column.
    pub fn commit(&mut self) -> Result<Row> {
        let row = self
            .table
            .data()?
            .read_modify_write_row(&self.row_key, &self.rules)?;
        self.clear();
        Ok(row)
    }
}
