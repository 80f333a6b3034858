use std::error::Error;

use clap::{Parser, ValueEnum};
use serde_json::json;

use crate::aggregate::AggregationPolicy;
use crate::cluster::{cluster_table, clusters_to_table, ClusterConfig, OutputFields};
use crate::constants::export::DEFAULT_MAX_LINES;
use crate::export::export_chunked;
use crate::preview::preview;
use crate::table::Table;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    PairKeyed,
    BKeyed,
}

impl From<PolicyArg> for AggregationPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::PairKeyed => AggregationPolicy::PairKeyed,
            PolicyArg::BKeyed => AggregationPolicy::BKeyed,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "cluster_demo",
    disable_help_subcommand = true,
    about = "Cluster the bundled employee/department relation",
    long_about = "Build the bundled employee/department sample relation, partition it into \
                  connected clusters under the chosen aggregation policy, preview the cluster \
                  table, and optionally export it as chunked CSV files."
)]
struct ClusterDemoCli {
    #[arg(
        long,
        value_enum,
        default_value = "pair-keyed",
        help = "Aggregation key policy for auxiliary columns"
    )]
    policy: PolicyArg,
    #[arg(
        long,
        value_name = "PATH",
        help = "Optional base path for chunked CSV export of the cluster table"
    )]
    export_base: Option<String>,
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_LINES,
        help = "Max rows per exported CSV file"
    )]
    max_lines: usize,
}

/// Build the bundled employee/department sample relation: two connected
/// groups plus one singleton pair.
pub fn sample_relation() -> Table {
    let mut table = Table::new(["employeeId", "departmentId", "departmentName"]);
    let rows = [
        ("E1", "D1", "HR"),
        ("E2", "D1", "HR"),
        ("E2", "D2", "Sales"),
        ("E3", "D2", "Sales"),
        ("E4", "D3", "Engineering"),
    ];
    for (employee, department, name) in rows {
        // Arity matches the fixed layout above.
        let _ = table.push_row([json!(employee), json!(department), json!(name)]);
    }
    table
}

/// Run the clustering demo end to end: cluster, preview, optionally export.
pub fn run_cluster_demo<I>(args: I) -> Result<(), Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let cli = ClusterDemoCli::try_parse_from(
        std::iter::once("cluster_demo".to_string()).chain(args),
    )?;

    let relation = sample_relation();
    let config = ClusterConfig::new("employeeId", "departmentId", cli.policy.into())
        .with_auxiliary(["departmentName"]);
    let clusters = cluster_table(&relation, &config)?;
    let fields = OutputFields::derive(&config);
    let rendered = clusters_to_table(&clusters, &fields);

    println!("{} clusters from {} relation rows", clusters.len(), relation.len());
    println!("{}", preview(&rendered));

    if let Some(base) = cli.export_base {
        let files = export_chunked(&rendered, cli.max_lines, &base, true)?;
        println!("wrote {files} CSV files under {base}_*.csv");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_relation_clusters_into_two_groups() {
        let relation = sample_relation();
        let config =
            ClusterConfig::new("employeeId", "departmentId", AggregationPolicy::PairKeyed);
        let clusters = cluster_table(&relation, &config).unwrap();
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn demo_runs_with_both_policies() {
        let _lock = crate::preview::LIMITS_TEST_LOCK
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        run_cluster_demo(["--policy".to_string(), "pair-keyed".to_string()]).unwrap();
        run_cluster_demo(["--policy".to_string(), "b-keyed".to_string()]).unwrap();
    }

    #[test]
    fn demo_rejects_unknown_policy_values() {
        let result = run_cluster_demo(["--policy".to_string(), "both".to_string()]);
        assert!(result.is_err());
    }
}
