/// Row filters
///
/// Server-side filters applied to each row a read returns. Every variant is
/// evaluated through [`RowFilter::evaluate`], which maps a row's cells to the
/// surviving cells; a row left with no cells is not returned at all.
///
/// Cells are visited in row order: family, then qualifier, then newest
/// version first. Row-level limits and offsets count cells in that order.
///
/// # Composition
///
/// ```text
/// Chain([a, b, c])        c(b(a(row)))
/// Interleave([a, b])      a(row) ∪ b(row)
/// Condition(p, t, f)      if p(row) has cells { t(row) } else { f(row) }
/// ```
///
/// # Example
///
/// ```ignore
/// use fakebigtable::RowFilter;
///
/// let filter = RowFilter::chain([
///     RowFilter::row_key_regex("^user#.*")?,
///     RowFilter::cells_column_limit(1),
/// ]);
/// let rows: Vec<_> = table.read_rows(ReadRowsOptions::new().filter(filter))?.collect();
/// ```
mod regex;

use std::ops::{Bound, RangeBounds};

pub use self::regex::FullMatchRegex;
use crate::{
    cell::{RowData, TimestampRange},
    util::{Result, Slice, Status},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFilter {
    /// Keep every cell.
    PassAll,
    /// Drop every cell.
    BlockAll,
    /// Keep the row iff its key fully matches.
    RowKeyRegex(FullMatchRegex),
    /// Keep cells whose family id fully matches.
    FamilyNameRegex(FullMatchRegex),
    /// Keep cells whose qualifier fully matches.
    ColumnQualifierRegex(FullMatchRegex),
    /// Keep cells whose value fully matches.
    ValueRegex(FullMatchRegex),
    /// Keep cells of `family` whose qualifier lies within the bounds.
    ColumnRange {
        family: String,
        start: Bound<Slice>,
        end: Bound<Slice>,
    },
    /// Keep cells whose timestamp lies within the range.
    TimestampRange(TimestampRange),
    /// Skip the first N cells of the row.
    CellsRowOffset(usize),
    /// Keep the first N cells of the row.
    CellsRowLimit(usize),
    /// Keep the N newest versions of each column.
    CellsColumnLimit(usize),
    /// Replace every value with an empty one.
    StripValue,
    /// Attach a label to every cell.
    ApplyLabel(String),
    Chain(Vec<RowFilter>),
    Interleave(Vec<RowFilter>),
    Condition {
        predicate: Box<RowFilter>,
        true_filter: Option<Box<RowFilter>>,
        false_filter: Option<Box<RowFilter>>,
    },
}

impl RowFilter {
    pub fn row_key_regex(pattern: &str) -> Result<Self> {
        Ok(RowFilter::RowKeyRegex(FullMatchRegex::new(pattern)?))
    }

    pub fn family_name_regex(pattern: &str) -> Result<Self> {
        Ok(RowFilter::FamilyNameRegex(FullMatchRegex::new(pattern)?))
    }

    pub fn column_qualifier_regex(pattern: &str) -> Result<Self> {
        Ok(RowFilter::ColumnQualifierRegex(FullMatchRegex::new(pattern)?))
    }

    pub fn value_regex(pattern: &str) -> Result<Self> {
        Ok(RowFilter::ValueRegex(FullMatchRegex::new(pattern)?))
    }

    pub fn column_range(family: impl Into<String>, start: Bound<Slice>, end: Bound<Slice>) -> Self {
        RowFilter::ColumnRange {
            family: family.into(),
            start,
            end,
        }
    }

    pub fn timestamp_range(range: TimestampRange) -> Self {
        RowFilter::TimestampRange(range)
    }

    pub fn cells_row_offset(n: usize) -> Self {
        RowFilter::CellsRowOffset(n)
    }

    pub fn cells_row_limit(n: usize) -> Self {
        RowFilter::CellsRowLimit(n)
    }

    pub fn cells_column_limit(n: usize) -> Self {
        RowFilter::CellsColumnLimit(n)
    }

    pub fn strip_value() -> Self {
        RowFilter::StripValue
    }

    pub fn apply_label(label: &str) -> Result<Self> {
        if label.is_empty() {
            return Err(Status::invalid_argument("label must not be empty"));
        }
        Ok(RowFilter::ApplyLabel(label.to_string()))
    }

    pub fn chain(filters: impl IntoIterator<Item = RowFilter>) -> Self {
        RowFilter::Chain(filters.into_iter().collect())
    }

    pub fn interleave(filters: impl IntoIterator<Item = RowFilter>) -> Self {
        RowFilter::Interleave(filters.into_iter().collect())
    }

    pub fn condition(
        predicate: RowFilter,
        true_filter: Option<RowFilter>,
        false_filter: Option<RowFilter>,
    ) -> Self {
        RowFilter::Condition {
            predicate: Box::new(predicate),
            true_filter: true_filter.map(Box::new),
            false_filter: false_filter.map(Box::new),
        }
    }

    /// Map the cells of the row keyed `row_key` to the cells that survive.
    pub fn evaluate(&self, row_key: &Slice, mut data: RowData) -> RowData {
        match self {
            RowFilter::PassAll => data,
            RowFilter::BlockAll => RowData::new(),
            RowFilter::RowKeyRegex(re) => {
                if re.is_match(row_key.data()) {
                    data
                } else {
                    RowData::new()
                }
            },
            RowFilter::FamilyNameRegex(re) => {
                data.retain(|family, _, _| re.is_match(family.as_bytes()));
                data
            },
            RowFilter::ColumnQualifierRegex(re) => {
                data.retain(|_, qualifier, _| re.is_match(qualifier.data()));
                data
            },
            RowFilter::ValueRegex(re) => {
                data.retain(|_, _, cell| re.is_match(cell.value().data()));
                data
            },
            RowFilter::ColumnRange { family, start, end } => {
                let bounds = (start.clone(), end.clone());
                data.retain(|f, qualifier, _| f == family.as_str() && bounds.contains(qualifier));
                data
            },
            RowFilter::TimestampRange(range) => {
                data.retain(|_, _, cell| range.contains(cell.timestamp_micros()));
                data
            },
            RowFilter::CellsRowOffset(n) => {
                let mut seen = 0;
                data.retain(|_, _, _| {
                    seen += 1;
                    seen > *n
                });
                data
            },
            RowFilter::CellsRowLimit(n) => {
                let mut seen = 0;
                data.retain(|_, _, _| {
                    seen += 1;
                    seen <= *n
                });
                data
            },
            RowFilter::CellsColumnLimit(n) => {
                data.limit_versions(*n);
                data
            },
            RowFilter::StripValue => {
                data.for_each_cell_mut(|cell| cell.value = Slice::empty());
                data
            },
            RowFilter::ApplyLabel(label) => {
                data.for_each_cell_mut(|cell| cell.labels.push(label.clone()));
                data
            },
            RowFilter::Chain(filters) => filters.iter().fold(data, |acc, filter| {
                if acc.is_empty() {
                    acc
                } else {
                    filter.evaluate(row_key, acc)
                }
            }),
            RowFilter::Interleave(filters) => {
                let mut merged = RowData::new();
                for filter in filters {
                    merged.merge(filter.evaluate(row_key, data.clone()));
                }
                merged
            },
            RowFilter::Condition {
                predicate,
                true_filter,
                false_filter,
            } => {
                let matched = !predicate.evaluate(row_key, data.clone()).is_empty();
                let branch = if matched { true_filter } else { false_filter };
                match branch {
                    Some(filter) => filter.evaluate(row_key, data),
                    None => RowData::new(),
                }
            },
        }
    }

    /// Whether any cell of the row survives the filter.
    pub fn matches(&self, row_key: &Slice, data: &RowData) -> bool {
        !self.evaluate(row_key, data.clone()).is_empty()
    }
}
