use std::collections::{BTreeMap, BTreeSet};

use crate::{
    cell::RowData,
    client::EmulatorOptions,
    column_family::ColumnFamilySet,
    gc::GcRule,
    mutation::Mutation,
    util::{
        Result, SERVER_TIMESTAMP, ServerClock, Slice, Status,
        clock::{TIMESTAMP_GRANULARITY_MICROS, now_micros},
    },
};

/// What a row commit needs from its table.
pub(crate) struct MutationContext<'a> {
    pub families: &'a ColumnFamilySet,
    pub clock: &'a ServerClock,
    pub options: &'a EmulatorOptions,
}

impl MutationContext<'_> {
    /// Resolve the rules of every family named by `families`, failing on the
    /// first unknown one.
    pub(crate) fn resolve_all<'f>(
        &self,
        families: impl IntoIterator<Item = &'f str>,
    ) -> Result<BTreeMap<String, GcRule>> {
        let mut rules = BTreeMap::new();
        for family in families {
            if rules.contains_key(family) {
                continue;
            }
            let rule = self
                .families
                .resolve(family)
                .map_err(|_| Status::unknown_family(family))?;
            rules.insert(family.to_string(), rule);
        }
        Ok(rules)
    }

    pub(crate) fn check_value_size(&self, value: &Slice) -> Result<()> {
        if value.size() > self.options.max_value_size {
            return Err(Status::invalid_argument(format!(
                "cell value of {} bytes exceeds the limit of {} bytes",
                value.size(),
                self.options.max_value_size
            )));
        }
        Ok(())
    }
}

/// Counters of one applied commit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Applied {
    pub cells_written: u64,
    pub cells_evicted: u64,
}

/// Apply `mutations` to `image` in order, then garbage collect every column
/// they touched.
///
/// Everything is validated before the first change, so on `Err` the image is
/// exactly as it was passed in.
pub(crate) fn apply_mutations(
    image: &mut RowData,
    mutations: &[Mutation],
    ctx: &MutationContext<'_>,
) -> Result<Applied> {
    if mutations.len() > ctx.options.max_mutations_per_row {
        return Err(Status::invalid_argument(format!(
            "{} mutations exceed the limit of {} per row",
            mutations.len(),
            ctx.options.max_mutations_per_row
        )));
    }

    let rules = ctx.resolve_all(mutations.iter().filter_map(Mutation::family))?;
    for mutation in mutations {
        validate(mutation, ctx)?;
    }

    let server_ts = mutations
        .iter()
        .any(|m| {
            matches!(
                m,
                Mutation::SetCell {
                    timestamp_micros: SERVER_TIMESTAMP,
                    ..
                }
            )
        })
        .then(|| ctx.clock.next_timestamp());

    let mut applied = Applied::default();
    let mut touched: BTreeSet<(&str, &Slice)> = BTreeSet::new();
    for mutation in mutations {
        match mutation {
            Mutation::SetCell {
                family,
                qualifier,
                timestamp_micros,
                value,
            } => {
                let ts = match (*timestamp_micros, server_ts) {
                    (SERVER_TIMESTAMP, Some(server_ts)) => server_ts,
                    (ts, _) => ts,
                };
                image.write(family, qualifier.clone(), ts, value.clone());
                touched.insert((family.as_str(), qualifier));
                applied.cells_written += 1;
            },
            Mutation::DeleteFromColumn {
                family,
                qualifier,
                time_range,
            } => {
                image.delete_cells(family, qualifier.data(), time_range);
            },
            Mutation::DeleteFromFamily { family } => {
                image.delete_family(family);
            },
            Mutation::DeleteFromRow => {
                image.clear();
            },
        }
    }

    let now = now_micros();
    for (family, qualifier) in touched {
        if let Some(rule) = rules.get(family) {
            applied.cells_evicted += image.gc_column(family, qualifier.data(), rule, now) as u64;
        }
    }

    Ok(applied)
}

fn validate(mutation: &Mutation, ctx: &MutationContext<'_>) -> Result<()> {
    match mutation {
        Mutation::SetCell {
            timestamp_micros,
            value,
            ..
        } => {
            validate_timestamp(*timestamp_micros)?;
            ctx.check_value_size(value)
        },
        Mutation::DeleteFromColumn { time_range, .. } => time_range.validate(),
        Mutation::DeleteFromFamily { .. } | Mutation::DeleteFromRow => Ok(()),
    }
}

fn validate_timestamp(timestamp_micros: i64) -> Result<()> {
    if timestamp_micros == SERVER_TIMESTAMP {
        return Ok(());
    }
    if timestamp_micros < 0 {
        return Err(Status::invalid_argument(format!(
            "invalid timestamp {timestamp_micros}"
        )));
    }
    if timestamp_micros % TIMESTAMP_GRANULARITY_MICROS != 0 {
        return Err(Status::invalid_argument(format!(
            "timestamp {timestamp_micros} is not a whole number of milliseconds"
        )));
    }
    Ok(())
}
