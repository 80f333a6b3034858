#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Attribute aggregation policies and the per-cluster accumulator.
pub mod aggregate;
/// Cluster assembly over a relation table.
pub mod cluster;
/// Centralized constants used across clustering, export, and preview.
pub mod constants;
/// Map-column disaggregation into key/value columns.
pub mod disagg;
/// Public email-domain reference list and row filter.
pub mod domains;
/// Email syntax validation helpers.
pub mod email;
/// Reusable example runners shared by demo binaries.
pub mod example_apps;
/// Chunked CSV export.
pub mod export;
/// Side-tagged canonical partition nodes.
pub mod node;
/// Disjoint-set partition over canonical nodes.
pub mod partition;
/// Table preview and display-limit scoping.
pub mod preview;
/// In-memory relation table model.
pub mod table;
/// Shared type aliases.
pub mod types;

mod errors;

pub use aggregate::{AggregationPolicy, AttributeAggregator};
pub use cluster::{
    cluster_table, cluster_table_with_fields, clusters_to_table, ClusterConfig, ClusterRecord,
    OutputFields,
};
pub use disagg::expand_map_column;
pub use domains::{email_domain, load_public_domains, strip_public_domains, DomainSummary};
pub use email::{is_valid_email, retain_valid_emails};
pub use errors::CrosslinkError;
pub use export::export_chunked;
pub use node::{Node, Side};
pub use partition::DisjointSet;
pub use preview::{active_limits, preview, render, DisplayLimits, DisplayLimitsGuard};
pub use table::{cell_text, Table};
pub use types::{CellValue, ColumnName, DomainName, FieldName, RawId};
