use std::collections::BTreeSet;

use crate::{
    cell::RowData,
    mutation::MutationContext,
    util::{Result, Slice, Status, clock::TIMESTAMP_GRANULARITY_MICROS, clock::now_micros},
};

/// A read-modify-write rule: combine the newest value of a column with an
/// operand and write the result as a new version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadModifyWriteRule {
    /// Append bytes to the current value; a missing cell counts as empty.
    Append {
        family: String,
        qualifier: Slice,
        value: Slice,
    },
    /// Add to the current value read as a 64-bit big-endian signed integer;
    /// a missing cell counts as zero. Overflow wraps.
    Increment {
        family: String,
        qualifier: Slice,
        delta: i64,
    },
}

impl ReadModifyWriteRule {
    pub fn family(&self) -> &str {
        match self {
            ReadModifyWriteRule::Append { family, .. }
            | ReadModifyWriteRule::Increment { family, .. } => family,
        }
    }

    pub fn qualifier(&self) -> &Slice {
        match self {
            ReadModifyWriteRule::Append { qualifier, .. }
            | ReadModifyWriteRule::Increment { qualifier, .. } => qualifier,
        }
    }

    fn merge(&self, existing: Option<&Slice>) -> Result<Slice> {
        match self {
            ReadModifyWriteRule::Append { value, .. } => {
                let mut merged = existing.map(Slice::to_vec).unwrap_or_default();
                merged.extend_from_slice(value.data());
                Ok(Slice::from(merged))
            },
            ReadModifyWriteRule::Increment { delta, .. } => {
                let current = match existing {
                    None => 0,
                    Some(v) => {
                        let bytes: [u8; 8] = v.data().try_into().map_err(|_| {
                            Status::invalid_argument(format!(
                                "cannot increment a {}-byte value; expected a 64-bit big-endian integer",
                                v.size()
                            ))
                        })?;
                        i64::from_be_bytes(bytes)
                    },
                };
                Ok(Slice::from(current.wrapping_add(*delta).to_be_bytes().to_vec()))
            },
        }
    }
}

/// Apply `rules` in order to `image`. Returns the new newest version of every
/// column the rules touched.
///
/// Like [`super::apply_mutations`], nothing is changed when an error is
/// returned before the first rule runs; a failing rule in the middle leaves
/// `image` partially modified, so callers apply to a copy.
pub(crate) fn apply_rules(
    image: &mut RowData,
    rules: &[ReadModifyWriteRule],
    ctx: &MutationContext<'_>,
) -> Result<RowData> {
    if rules.is_empty() {
        return Err(Status::invalid_argument("no read-modify-write rules provided"));
    }
    let gc_rules = ctx.resolve_all(rules.iter().map(ReadModifyWriteRule::family))?;

    let mut touched: BTreeSet<(&str, &Slice)> = BTreeSet::new();
    for rule in rules {
        let (family, qualifier) = (rule.family(), rule.qualifier());
        let newest = image
            .column(family, qualifier.data())
            .and_then(|cells| cells.first());

        let merged = rule.merge(newest.map(|c| c.value()))?;
        ctx.check_value_size(&merged)?;

        let mut ts = ctx.clock.next_timestamp();
        if let Some(cell) = newest
            && cell.timestamp_micros() >= ts
        {
            ts = cell
                .timestamp_micros()
                .checked_add(TIMESTAMP_GRANULARITY_MICROS)
                .ok_or_else(|| {
                    Status::invalid_argument(format!(
                        "no timestamp after {} is available for a new version",
                        cell.timestamp_micros()
                    ))
                })?;
        }

        image.write(family, qualifier.clone(), ts, merged);
        touched.insert((family, qualifier));
    }

    let now = now_micros();
    let mut result = RowData::new();
    for (family, qualifier) in touched {
        if let Some(rule) = gc_rules.get(family) {
            image.gc_column(family, qualifier.data(), rule, now);
        }
        if let Some(cell) = image
            .column(family, qualifier.data())
            .and_then(|cells| cells.first())
        {
            result.write(
                family,
                qualifier.clone(),
                cell.timestamp_micros(),
                cell.value().clone(),
            );
        }
    }
    Ok(result)
}
