use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::types::{CellValue, ColumnName, RawId};

/// Rule selecting which relation rows feed a cluster's auxiliary attribute
/// sequence.
///
/// The two policies are materially different and neither is a default; every
/// clustering call names one explicitly.
///
/// - `PairKeyed` keys each value by the exact `(a, b)` identifier pair of
///   the row that carried it. Assembly concatenates the lists of every
///   `(a, b)` combination of the cluster's members, so duplicates are
///   preserved and values can surface for member pairs that never co-occur
///   on a literal row but were joined transitively.
/// - `BKeyed` treats each auxiliary column as a single-valued attribute of
///   the B-side entity: one value per B-side identifier, last write wins
///   when rows repeat a `b` with different values. Assembly yields at most
///   one value per B-side member; absent keys are skipped, never padded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationPolicy {
    /// Key values by the `(a, b)` identifier pair.
    PairKeyed,
    /// Key values by the B-side identifier alone.
    BKeyed,
}

/// Accumulates auxiliary column values under the active policy.
///
/// Recording and lookup are total: a `collect` miss yields omission, never
/// an error.
#[derive(Clone, Debug)]
pub struct AttributeAggregator {
    policy: AggregationPolicy,
    pair_values: HashMap<ColumnName, HashMap<(RawId, RawId), Vec<CellValue>>>,
    b_values: HashMap<ColumnName, HashMap<RawId, CellValue>>,
}

impl AttributeAggregator {
    /// Create an empty accumulator for `policy`.
    pub fn new(policy: AggregationPolicy) -> Self {
        Self {
            policy,
            pair_values: HashMap::new(),
            b_values: HashMap::new(),
        }
    }

    /// The active aggregation policy.
    pub fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    /// Record one row's value of `column` for the `(a_id, b_id)` endpoints.
    pub fn record(&mut self, a_id: &RawId, b_id: &RawId, column: &ColumnName, value: CellValue) {
        match self.policy {
            AggregationPolicy::PairKeyed => {
                self.pair_values
                    .entry(column.clone())
                    .or_default()
                    .entry((a_id.clone(), b_id.clone()))
                    .or_default()
                    .push(value);
            }
            AggregationPolicy::BKeyed => {
                self.b_values
                    .entry(column.clone())
                    .or_default()
                    .insert(b_id.clone(), value);
            }
        }
    }

    /// Aggregated sequence of `column` for a cluster, querying in the
    /// iteration order of the member sets.
    pub fn collect(
        &self,
        column: &str,
        a_members: &BTreeSet<RawId>,
        b_members: &BTreeSet<RawId>,
    ) -> Vec<CellValue> {
        match self.policy {
            AggregationPolicy::PairKeyed => {
                let Some(by_pair) = self.pair_values.get(column) else {
                    return Vec::new();
                };
                let mut values = Vec::new();
                for a_id in a_members {
                    for b_id in b_members {
                        if let Some(list) = by_pair.get(&(a_id.clone(), b_id.clone())) {
                            values.extend(list.iter().cloned());
                        }
                    }
                }
                values
            }
            AggregationPolicy::BKeyed => {
                let Some(by_b) = self.b_values.get(column) else {
                    return Vec::new();
                };
                b_members
                    .iter()
                    .filter_map(|b_id| by_b.get(b_id).cloned())
                    .collect()
            }
        }
    }
}
