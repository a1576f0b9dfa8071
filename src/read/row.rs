use std::collections::BTreeMap;

use crate::{
    cell::{Cell, ColumnMap, RowData},
    util::Slice,
};

/// A row as returned by a read, after filtering.
///
/// Never empty: reads report a row with no surviving cells as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    row_key: Slice,
    data: RowData,
}

impl Row {
    pub(crate) fn new(row_key: Slice, data: RowData) -> Self {
        Row { row_key, data }
    }

    pub fn row_key(&self) -> &Slice {
        &self.row_key
    }

    /// Value of the newest surviving version of a column.
    pub fn cell_value(&self, family: &str, qualifier: impl AsRef<[u8]>) -> Option<&Slice> {
        self.cells(family, qualifier).first().map(Cell::value)
    }

    /// Surviving versions of a column, newest first.
    pub fn cells(&self, family: &str, qualifier: impl AsRef<[u8]>) -> &[Cell] {
        self.data
            .column(family, qualifier.as_ref())
            .unwrap_or_default()
    }

    pub fn families(&self) -> &BTreeMap<String, ColumnMap> {
        self.data.families()
    }

    pub fn cell_count(&self) -> usize {
        self.data.cell_count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_data(self) -> RowData {
        self.data
    }
}
