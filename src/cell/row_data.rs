use std::collections::BTreeMap;

use crate::{
    cell::{Cell, TimestampRange},
    gc::GcRule,
    util::Slice,
};

/// Columns of one family: qualifier → versions, newest first.
pub type ColumnMap = BTreeMap<Slice, Vec<Cell>>;

/// All cells of one row, grouped by family and qualifier.
///
/// Empty columns and families are removed eagerly, so a `RowData` with no
/// cells has no families either and the row reads as absent.
///
/// Version lists are ordered by timestamp, newest first. Writing a cell at a
/// timestamp that already exists replaces that version in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowData {
    families: BTreeMap<String, ColumnMap>,
}

impl RowData {
    pub fn new() -> Self {
        RowData::default()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn families(&self) -> &BTreeMap<String, ColumnMap> {
        &self.families
    }

    pub fn family(&self, family: &str) -> Option<&ColumnMap> {
        self.families.get(family)
    }

    pub fn column(&self, family: &str, qualifier: &[u8]) -> Option<&[Cell]> {
        self.families
            .get(family)
            .and_then(|columns| columns.get(qualifier))
            .map(Vec::as_slice)
    }

    pub fn cell_count(&self) -> usize {
        self.families
            .values()
            .flat_map(|columns| columns.values())
            .map(Vec::len)
            .sum()
    }

    /// Add a version, or overwrite the version with the same timestamp.
    pub fn write(&mut self, family: &str, qualifier: Slice, timestamp_micros: i64, value: Slice) {
        let cells = self
            .families
            .entry(family.to_string())
            .or_default()
            .entry(qualifier)
            .or_default();

        match cells.binary_search_by(|c| c.timestamp_micros.cmp(&timestamp_micros).reverse()) {
            Ok(pos) => cells[pos].value = value,
            Err(pos) => cells.insert(pos, Cell::new(timestamp_micros, value)),
        }
    }

    /// Remove the versions of one column that fall into `range`.
    ///
    /// Returns the number of removed cells.
    pub fn delete_cells(&mut self, family: &str, qualifier: &[u8], range: &TimestampRange) -> usize {
        let Some(columns) = self.families.get_mut(family) else {
            return 0;
        };
        let Some(cells) = columns.get_mut(qualifier) else {
            return 0;
        };

        let before = cells.len();
        cells.retain(|c| !range.contains(c.timestamp_micros));
        let removed = before - cells.len();

        if cells.is_empty() {
            columns.remove(qualifier);
            if columns.is_empty() {
                self.families.remove(family);
            }
        }
        removed
    }

    /// Remove every cell of one family.
    pub fn delete_family(&mut self, family: &str) -> usize {
        self.families
            .remove(family)
            .map(|columns| columns.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Remove every cell of the row.
    pub fn clear(&mut self) -> usize {
        let removed = self.cell_count();
        self.families.clear();
        removed
    }

    /// Apply `rule` to one column. Returns the number of evicted cells.
    pub fn gc_column(&mut self, family: &str, qualifier: &[u8], rule: &GcRule, now_micros: i64) -> usize {
        let Some(columns) = self.families.get_mut(family) else {
            return 0;
        };
        let Some(cells) = columns.get_mut(qualifier) else {
            return 0;
        };

        let before = cells.len();
        let survivors = rule.apply(std::mem::take(cells), now_micros);
        let evicted = before - survivors.len();
        *cells = survivors;

        if cells.is_empty() {
            columns.remove(qualifier);
            if columns.is_empty() {
                self.families.remove(family);
            }
        }
        evicted
    }

    /// Apply `rule` to every column of one family.
    pub fn gc_family(&mut self, family: &str, rule: &GcRule, now_micros: i64) -> usize {
        let qualifiers: Vec<Slice> = match self.families.get(family) {
            Some(columns) => columns.keys().cloned().collect(),
            None => return 0,
        };
        qualifiers
            .iter()
            .map(|q| self.gc_column(family, q.data(), rule, now_micros))
            .sum()
    }

    /// Keep only the cells for which `keep` returns true, visiting cells in
    /// row order: family, then qualifier, then newest version first.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &Slice, &Cell) -> bool,
    {
        self.families.retain(|family, columns| {
            columns.retain(|qualifier, cells| {
                cells.retain(|cell| keep(family, qualifier, cell));
                !cells.is_empty()
            });
            !columns.is_empty()
        });
    }

    /// Visit every cell mutably, in row order.
    pub fn for_each_cell_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Cell),
    {
        for columns in self.families.values_mut() {
            for cells in columns.values_mut() {
                cells.iter_mut().for_each(&mut f);
            }
        }
    }

    /// Truncate every column to its `limit` newest versions.
    pub fn limit_versions(&mut self, limit: usize) {
        self.families.retain(|_, columns| {
            columns.retain(|_, cells| {
                cells.truncate(limit);
                !cells.is_empty()
            });
            !columns.is_empty()
        });
    }

    /// Fold `other` into this row, keeping every cell of both.
    ///
    /// Versions stay newest first; equal timestamps keep `self`'s cell first.
    pub fn merge(&mut self, other: RowData) {
        for (family, columns) in other.families {
            let target = self.families.entry(family).or_default();
            for (qualifier, cells) in columns {
                let merged = target.entry(qualifier).or_default();
                merged.extend(cells);
                merged.sort_by(|a, b| b.timestamp_micros.cmp(&a.timestamp_micros));
            }
        }
    }
}
