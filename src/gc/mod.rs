/// Garbage collection rules
///
/// A column family owns one [`GcRule`]. The rule is evaluated against a
/// column's version list after every write to that column, so the store never
/// holds more versions than the rule lets survive.
///
/// # Composition
///
/// ```text
/// Union([MaxVersions(3), MaxAge(7d)])         evicts if ANY member evicts
/// Intersection([MaxVersions(3), MaxAge(7d)])  evicts only if ALL members evict
/// ```
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    cell::Cell,
    util::{Result, Status},
};

/// Retention policy over a column's versions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GcRule {
    /// Keep every version.
    #[default]
    None,
    /// Keep the N most recent versions.
    MaxVersions(u32),
    /// Keep versions whose timestamp is within this age of now.
    MaxAge(Duration),
    Union(Vec<GcRule>),
    Intersection(Vec<GcRule>),
}

impl GcRule {
    pub fn max_versions(n: u32) -> Self {
        GcRule::MaxVersions(n)
    }

    pub fn max_age(age: Duration) -> Self {
        GcRule::MaxAge(age)
    }

    pub fn union(rules: impl IntoIterator<Item = GcRule>) -> Self {
        GcRule::Union(rules.into_iter().collect())
    }

    pub fn intersection(rules: impl IntoIterator<Item = GcRule>) -> Self {
        GcRule::Intersection(rules.into_iter().collect())
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            GcRule::None => Ok(()),
            GcRule::MaxVersions(0) => Err(Status::invalid_argument(
                "max_num_versions must be greater than 0",
            )),
            GcRule::MaxVersions(_) => Ok(()),
            GcRule::MaxAge(age) if age.is_zero() => {
                Err(Status::invalid_argument("max_age must be positive"))
            },
            GcRule::MaxAge(_) => Ok(()),
            GcRule::Union(rules) | GcRule::Intersection(rules) => {
                if rules.is_empty() {
                    return Err(Status::invalid_argument(
                        "union and intersection rules need at least one member",
                    ));
                }
                rules.iter().try_for_each(GcRule::validate)
            },
        }
    }

    /// Return the surviving versions. `versions` must be newest first; the
    /// order is preserved.
    pub fn apply(&self, versions: Vec<Cell>, now_micros: i64) -> Vec<Cell> {
        if matches!(self, GcRule::None) {
            return versions;
        }
        let evicted = self.evictions(&versions, now_micros);
        versions
            .into_iter()
            .zip(evicted)
            .filter_map(|(cell, evict)| (!evict).then_some(cell))
            .collect()
    }

    /// Per version, whether this rule evicts it.
    fn evictions(&self, versions: &[Cell], now_micros: i64) -> Vec<bool> {
        match self {
            GcRule::None => vec![false; versions.len()],
            GcRule::MaxVersions(n) => (0..versions.len()).map(|i| i >= *n as usize).collect(),
            GcRule::MaxAge(age) => {
                let cutoff = now_micros.saturating_sub(age.as_micros().min(i64::MAX as u128) as i64);
                versions.iter().map(|c| c.timestamp_micros < cutoff).collect()
            },
            GcRule::Union(rules) => rules.iter().fold(vec![false; versions.len()], |acc, r| {
                acc.into_iter()
                    .zip(r.evictions(versions, now_micros))
                    .map(|(a, b)| a || b)
                    .collect()
            }),
            GcRule::Intersection(rules) => rules.iter().fold(vec![true; versions.len()], |acc, r| {
                acc.into_iter()
                    .zip(r.evictions(versions, now_micros))
                    .map(|(a, b)| a && b)
                    .collect()
            }),
        }
    }
}
