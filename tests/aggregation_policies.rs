use serde_json::json;

use crosslink::{
    cluster_table, cluster_table_with_fields, AggregationPolicy, ClusterConfig, CrosslinkError,
    OutputFields, Table,
};

fn department_relation(rows: &[(&str, &str, &str)]) -> Table {
    let mut table = Table::new(["employeeId", "departmentId", "departmentName"]);
    for (employee, department, name) in rows {
        table
            .push_row([json!(employee), json!(department), json!(name)])
            .unwrap();
    }
    table
}

fn config(policy: AggregationPolicy) -> ClusterConfig {
    ClusterConfig::new("employeeId", "departmentId", policy)
        .with_auxiliary(["departmentName"])
}

#[test]
fn pair_keyed_keeps_one_value_per_row() {
    let table = department_relation(&[("E1", "D1", "HR"), ("E4", "D1", "HR")]);
    let clusters = cluster_table(&table, &config(AggregationPolicy::PairKeyed)).unwrap();

    assert_eq!(clusters.len(), 1);
    let values = &clusters[0].attributes["departmentId_departmentName"];
    assert_eq!(values, &vec![json!("HR"), json!("HR")]);
}

#[test]
fn b_keyed_collapses_to_one_value_per_department() {
    let table = department_relation(&[("E1", "D1", "HR"), ("E4", "D1", "HR")]);
    let clusters = cluster_table(&table, &config(AggregationPolicy::BKeyed)).unwrap();

    assert_eq!(clusters.len(), 1);
    let values = &clusters[0].attributes["departmentId_departmentName"];
    assert_eq!(values, &vec![json!("HR")]);
}

#[test]
fn b_keyed_conflicting_rows_take_the_last_write() {
    let table = department_relation(&[("E1", "D1", "HR"), ("E2", "D1", "People Ops")]);
    let clusters = cluster_table(&table, &config(AggregationPolicy::BKeyed)).unwrap();

    let values = &clusters[0].attributes["departmentId_departmentName"];
    assert_eq!(values, &vec![json!("People Ops")]);
}

#[test]
fn b_keyed_emits_one_value_per_department_in_member_order() {
    let table = department_relation(&[
        ("E1", "D2", "Sales"),
        ("E1", "D1", "HR"),
    ]);
    let clusters = cluster_table(&table, &config(AggregationPolicy::BKeyed)).unwrap();

    // Member sets iterate sorted, so D1 comes before D2 regardless of row order.
    let values = &clusters[0].attributes["departmentId_departmentName"];
    assert_eq!(values, &vec![json!("HR"), json!("Sales")]);
}

#[test]
fn pair_keyed_queries_transitive_member_combinations_silently() {
    // E1 and E2 join through D1; the (E1, D2) combination never occurred on
    // a row and must simply contribute nothing.
    let table = department_relation(&[
        ("E1", "D1", "HR"),
        ("E2", "D1", "HR"),
        ("E2", "D2", "Sales"),
    ]);
    let clusters = cluster_table(&table, &config(AggregationPolicy::PairKeyed)).unwrap();

    assert_eq!(clusters.len(), 1);
    let values = &clusters[0].attributes["departmentId_departmentName"];
    assert_eq!(
        values,
        &vec![json!("HR"), json!("HR"), json!("Sales")]
    );
}

#[test]
fn clusters_without_auxiliary_columns_carry_no_attributes() {
    let table = department_relation(&[("E1", "D1", "HR")]);
    let bare = ClusterConfig::new("employeeId", "departmentId", AggregationPolicy::PairKeyed);
    let clusters = cluster_table(&table, &bare).unwrap();
    assert!(clusters[0].attributes.is_empty());
}

#[test]
fn custom_field_mapping_renames_the_output() {
    let table = department_relation(&[("E1", "D1", "HR")]);
    let config = config(AggregationPolicy::BKeyed);
    let mut fields = OutputFields::derive(&config);
    assert!(fields.rename_attribute("departmentName", "deptName"));

    let clusters = cluster_table_with_fields(&table, &config, &fields).unwrap();
    assert!(clusters[0].attributes.contains_key("deptName"));
    assert!(!clusters[0].attributes.contains_key("departmentId_departmentName"));
}

#[test]
fn colliding_field_mapping_is_rejected_up_front() {
    let table = department_relation(&[("E1", "D1", "HR")]);
    let config = config(AggregationPolicy::BKeyed);
    let mut fields = OutputFields::derive(&config);
    fields.rename_attribute("departmentName", "departmentIds");

    let result = cluster_table_with_fields(&table, &config, &fields);
    assert!(matches!(result, Err(CrosslinkError::Configuration(_))));
}

#[test]
fn missing_auxiliary_column_raises_schema_error_without_output() {
    let table = department_relation(&[("E1", "D1", "HR")]);
    let config = ClusterConfig::new("employeeId", "departmentId", AggregationPolicy::PairKeyed)
        .with_auxiliary(["budget"]);
    let result = cluster_table(&table, &config);
    assert!(matches!(result, Err(CrosslinkError::MissingColumn(name)) if name == "budget"));
}
