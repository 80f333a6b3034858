use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::aggregate::{AggregationPolicy, AttributeAggregator};
use crate::constants::cluster::{ATTRIBUTE_FIELD_JOINER, MEMBERS_FIELD_SUFFIX};
use crate::errors::CrosslinkError;
use crate::node::{Node, Side};
use crate::partition::DisjointSet;
use crate::table::{cell_text, Table};
use crate::types::{CellValue, ColumnName, FieldName, RawId};

/// Configuration for one clustering pass over a relation table.
#[derive(Clone, Debug)]
pub struct ClusterConfig {
    /// Name of the A-side entity column.
    pub column_a: ColumnName,
    /// Name of the B-side entity column.
    pub column_b: ColumnName,
    /// Auxiliary columns aggregated per cluster, in output order.
    pub auxiliary: Vec<ColumnName>,
    /// Aggregation key policy. There is no default; see
    /// [`AggregationPolicy`] for how the two choices differ.
    pub policy: AggregationPolicy,
}

impl ClusterConfig {
    /// Configure a pass over `column_a` and `column_b` with no auxiliary
    /// columns.
    pub fn new(
        column_a: impl Into<ColumnName>,
        column_b: impl Into<ColumnName>,
        policy: AggregationPolicy,
    ) -> Self {
        Self {
            column_a: column_a.into(),
            column_b: column_b.into(),
            auxiliary: Vec::new(),
            policy,
        }
    }

    /// Add auxiliary columns to aggregate per cluster.
    pub fn with_auxiliary<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ColumnName>,
    {
        self.auxiliary.extend(columns.into_iter().map(Into::into));
        self
    }
}

/// Explicit mapping from configured columns to output field names.
///
/// Derived once per call instead of interpolated at emit time, so callers
/// can rename targets and collisions are caught up front.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFields {
    /// Field holding a cluster's A-side members.
    pub a_members: FieldName,
    /// Field holding a cluster's B-side members.
    pub b_members: FieldName,
    /// Target field per auxiliary column, in configured order.
    pub attributes: IndexMap<ColumnName, FieldName>,
}

impl OutputFields {
    /// Derive the default naming from `config`: `{column_a}s`,
    /// `{column_b}s`, and `{column_b}_{column}` per auxiliary column.
    pub fn derive(config: &ClusterConfig) -> Self {
        let attributes = config
            .auxiliary
            .iter()
            .map(|column| {
                (
                    column.clone(),
                    format!(
                        "{}{}{}",
                        config.column_b, ATTRIBUTE_FIELD_JOINER, column
                    ),
                )
            })
            .collect();
        Self {
            a_members: format!("{}{}", config.column_a, MEMBERS_FIELD_SUFFIX),
            b_members: format!("{}{}", config.column_b, MEMBERS_FIELD_SUFFIX),
            attributes,
        }
    }

    /// Point the output of one auxiliary column at a different field name.
    /// Returns `false` when `column` is not mapped.
    pub fn rename_attribute(&mut self, column: &str, field: impl Into<FieldName>) -> bool {
        match self.attributes.get_mut(column) {
            Some(target) => {
                *target = field.into();
                true
            }
            None => false,
        }
    }

    /// Fail when two outputs collide on the same field name.
    pub fn validate(&self) -> Result<(), CrosslinkError> {
        let mut seen = BTreeSet::new();
        for field in [&self.a_members, &self.b_members]
            .into_iter()
            .chain(self.attributes.values())
        {
            if !seen.insert(field) {
                return Err(CrosslinkError::Configuration(format!(
                    "output field '{field}' is mapped more than once"
                )));
            }
        }
        Ok(())
    }
}

/// One maximal connected group of identifiers with its aggregated
/// attributes.
///
/// Member sets are kept sorted for deterministic output; attribute
/// sequences are keyed by output field name in configured order. Records
/// are created once during assembly and never mutated afterward.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterRecord {
    /// A-side raw identifiers in this cluster.
    pub a_members: BTreeSet<RawId>,
    /// B-side raw identifiers in this cluster.
    pub b_members: BTreeSet<RawId>,
    /// Aggregated auxiliary values, keyed by output field name.
    pub attributes: IndexMap<FieldName, Vec<CellValue>>,
}

/// Partition a relation table into maximal connected clusters.
///
/// Two identifiers share a cluster exactly when a chain of relation rows
/// connects them; a direct row between them is not required. Every
/// identifier that appears in any row lands in exactly one cluster on its
/// side.
///
/// Auxiliary column values are aggregated per cluster under
/// `config.policy`; the choice between [`AggregationPolicy::PairKeyed`] and
/// [`AggregationPolicy::BKeyed`] changes both the key and the shape of the
/// result, see the enum docs.
///
/// Schema validation runs before any state is built: a missing entity or
/// auxiliary column fails with `MissingColumn` and zero side effects.
/// Clusters are emitted in the order their partition root is first
/// encountered in row order.
pub fn cluster_table(
    table: &Table,
    config: &ClusterConfig,
) -> Result<Vec<ClusterRecord>, CrosslinkError> {
    cluster_table_with_fields(table, config, &OutputFields::derive(config))
}

/// Same as [`cluster_table`], but with caller-controlled output field
/// naming.
pub fn cluster_table_with_fields(
    table: &Table,
    config: &ClusterConfig,
    fields: &OutputFields,
) -> Result<Vec<ClusterRecord>, CrosslinkError> {
    let col_a = table.require_column(&config.column_a)?;
    let col_b = table.require_column(&config.column_b)?;
    let mut aux_columns = Vec::with_capacity(config.auxiliary.len());
    for column in &config.auxiliary {
        let idx = table.require_column(column)?;
        let field = fields.attributes.get(column).cloned().ok_or_else(|| {
            CrosslinkError::Configuration(format!(
                "no output field mapped for auxiliary column '{column}'"
            ))
        })?;
        aux_columns.push((column.clone(), idx, field));
    }
    fields.validate()?;

    let mut partition = DisjointSet::new();
    let mut aggregator = AttributeAggregator::new(config.policy);
    for row in table.rows() {
        let a_id = cell_text(&row[col_a]);
        let b_id = cell_text(&row[col_b]);
        let node_a = Node::a(a_id.clone());
        let node_b = Node::b(b_id.clone());
        partition.union(&node_a, &node_b);
        for (column, idx, _) in &aux_columns {
            aggregator.record(&a_id, &b_id, column, row[*idx].clone());
        }
    }

    let classes = partition.classes();
    debug!(
        rows = table.len(),
        nodes = partition.len(),
        clusters = classes.len(),
        "assembled relation partition"
    );

    let mut clusters = Vec::with_capacity(classes.len());
    for class in classes {
        let mut a_members = BTreeSet::new();
        let mut b_members = BTreeSet::new();
        for node in class {
            match node.side {
                Side::A => a_members.insert(node.id),
                Side::B => b_members.insert(node.id),
            };
        }
        let mut attributes = IndexMap::with_capacity(aux_columns.len());
        for (column, _, field) in &aux_columns {
            let values = aggregator.collect(column, &a_members, &b_members);
            attributes.insert(field.clone(), values);
        }
        clusters.push(ClusterRecord {
            a_members,
            b_members,
            attributes,
        });
    }
    Ok(clusters)
}

/// Render cluster records into a table under `fields` naming, one row per
/// cluster. Member sets and attribute sequences become JSON arrays.
pub fn clusters_to_table(clusters: &[ClusterRecord], fields: &OutputFields) -> Table {
    let mut columns = vec![fields.a_members.clone(), fields.b_members.clone()];
    columns.extend(fields.attributes.values().cloned());

    let mut table = Table::new(columns);
    for cluster in clusters {
        let mut cells = vec![id_array(&cluster.a_members), id_array(&cluster.b_members)];
        for field in fields.attributes.values() {
            let values = cluster
                .attributes
                .get(field)
                .cloned()
                .unwrap_or_default();
            cells.push(Value::Array(values));
        }
        // Arity is fixed by the field mapping above.
        let _ = table.push_row(cells);
    }
    table
}

fn id_array(members: &BTreeSet<RawId>) -> CellValue {
    Value::Array(members.iter().cloned().map(Value::String).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn relation(rows: &[(&str, &str, &str)]) -> Table {
        let mut table = Table::new(["employeeId", "departmentId", "departmentName"]);
        for (a_id, b_id, name) in rows {
            table
                .push_row([json!(a_id), json!(b_id), json!(name)])
                .unwrap();
        }
        table
    }

    #[test]
    fn derive_builds_default_field_names() {
        let config = ClusterConfig::new("employeeId", "departmentId", AggregationPolicy::PairKeyed)
            .with_auxiliary(["departmentName"]);
        let fields = OutputFields::derive(&config);
        assert_eq!(fields.a_members, "employeeIds");
        assert_eq!(fields.b_members, "departmentIds");
        assert_eq!(
            fields.attributes.get("departmentName").map(String::as_str),
            Some("departmentId_departmentName")
        );
    }

    #[test]
    fn validate_rejects_colliding_field_names() {
        let config = ClusterConfig::new("employeeId", "departmentId", AggregationPolicy::PairKeyed)
            .with_auxiliary(["departmentName"]);
        let mut fields = OutputFields::derive(&config);
        assert!(fields.rename_attribute("departmentName", "employeeIds"));
        assert!(matches!(
            fields.validate(),
            Err(CrosslinkError::Configuration(_))
        ));
    }

    #[test]
    fn rename_attribute_requires_a_mapped_column() {
        let config = ClusterConfig::new("employeeId", "departmentId", AggregationPolicy::PairKeyed);
        let mut fields = OutputFields::derive(&config);
        assert!(!fields.rename_attribute("unmapped", "other"));
    }

    #[test]
    fn single_row_yields_one_cluster_with_both_ids() {
        let table = relation(&[("E1", "D1", "HR")]);
        let config = ClusterConfig::new("employeeId", "departmentId", AggregationPolicy::PairKeyed);
        let clusters = cluster_table(&table, &config).unwrap();
        assert_eq!(clusters.len(), 1);
        assert!(clusters[0].a_members.contains("E1"));
        assert!(clusters[0].b_members.contains("D1"));
    }

    #[test]
    fn missing_auxiliary_column_fails_before_processing() {
        let table = relation(&[("E1", "D1", "HR")]);
        let config = ClusterConfig::new("employeeId", "departmentId", AggregationPolicy::PairKeyed)
            .with_auxiliary(["absentColumn"]);
        let result = cluster_table(&table, &config);
        assert!(
            matches!(result, Err(CrosslinkError::MissingColumn(name)) if name == "absentColumn")
        );
    }

    #[test]
    fn clusters_render_back_into_a_table() {
        let table = relation(&[("E1", "D1", "HR"), ("E2", "D2", "Sales")]);
        let config = ClusterConfig::new("employeeId", "departmentId", AggregationPolicy::BKeyed)
            .with_auxiliary(["departmentName"]);
        let clusters = cluster_table(&table, &config).unwrap();
        let fields = OutputFields::derive(&config);

        let rendered = clusters_to_table(&clusters, &fields);
        assert_eq!(
            rendered.columns(),
            ["employeeIds", "departmentIds", "departmentId_departmentName"]
        );
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered.cell(0, 0), Some(&json!(["E1"])));
        assert_eq!(rendered.cell(1, 2), Some(&json!(["Sales"])));
    }

    #[test]
    fn numeric_entity_cells_are_stringified() {
        let mut table = Table::new(["employeeId", "departmentId"]);
        table.push_row([json!(17), json!(5)]).unwrap();
        let config = ClusterConfig::new("employeeId", "departmentId", AggregationPolicy::PairKeyed);
        let clusters = cluster_table(&table, &config).unwrap();
        assert!(clusters[0].a_members.contains("17"));
        assert!(clusters[0].b_members.contains("5"));
    }
}
