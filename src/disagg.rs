use serde_json::Value;
use tracing::debug;

use crate::constants::disagg::{KEY_COLUMN_PREFIX, VALUE_COLUMN_PREFIX};
use crate::errors::CrosslinkError;
use crate::table::Table;
use crate::types::{CellValue, ColumnName};

/// Expand a column of row-wise key/value maps into interleaved
/// `key1,value1,...,keyN,valueN` columns, where `N` is the widest map in
/// the column.
///
/// Keys are sorted per row; rows with fewer pairs are padded with nulls.
/// The source column is dropped from the result. Cells must be JSON
/// objects (null counts as an empty map); anything else fails validation
/// before any output is built.
pub fn expand_map_column(table: &Table, column: &str) -> Result<Table, CrosslinkError> {
    let idx = table.require_column(column)?;

    let mut row_pairs: Vec<Vec<(String, CellValue)>> = Vec::with_capacity(table.len());
    let mut max_pairs = 0usize;
    for (row_idx, row) in table.rows().enumerate() {
        let pairs = match &row[idx] {
            Value::Object(map) => {
                let mut pairs: Vec<(String, CellValue)> = map
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                pairs.sort_by(|a, b| a.0.cmp(&b.0));
                pairs
            }
            Value::Null => Vec::new(),
            other => {
                return Err(CrosslinkError::Validation(format!(
                    "row {row_idx} of column '{column}' is not a key/value map: {other}"
                )));
            }
        };
        max_pairs = max_pairs.max(pairs.len());
        row_pairs.push(pairs);
    }

    let mut columns: Vec<ColumnName> = table
        .columns()
        .iter()
        .filter(|name| name.as_str() != column)
        .cloned()
        .collect();
    for pair_idx in 1..=max_pairs {
        columns.push(format!("{KEY_COLUMN_PREFIX}{pair_idx}"));
        columns.push(format!("{VALUE_COLUMN_PREFIX}{pair_idx}"));
    }

    let mut expanded = Table::new(columns);
    for (row, pairs) in table.rows().zip(row_pairs) {
        let mut cells: Vec<CellValue> = row
            .iter()
            .enumerate()
            .filter(|(cell_idx, _)| *cell_idx != idx)
            .map(|(_, value)| value.clone())
            .collect();
        for slot in 0..max_pairs {
            match pairs.get(slot) {
                Some((key, value)) => {
                    cells.push(Value::String(key.clone()));
                    cells.push(value.clone());
                }
                None => {
                    cells.push(Value::Null);
                    cells.push(Value::Null);
                }
            }
        }
        expanded.push_row(cells)?;
    }

    debug!(column, max_pairs, rows = expanded.len(), "expanded map column");
    Ok(expanded)
}
