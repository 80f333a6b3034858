use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CrosslinkError;
use crate::types::{CellValue, ColumnName};

/// In-memory columnar table: ordered column names plus row-major cells.
///
/// This is the unit every tool in the crate operates on. Rows are plain
/// `Vec<CellValue>` slices aligned with the column layout; there is no
/// per-column typing, matching the loosely typed relation exports the tools
/// consume.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<ColumnName>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Create an empty table with the given column layout.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ColumnName>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row whose arity matches the column layout.
    pub fn push_row<I>(&mut self, cells: I) -> Result<(), CrosslinkError>
    where
        I: IntoIterator<Item = CellValue>,
    {
        let row: Vec<CellValue> = cells.into_iter().collect();
        if row.len() != self.columns.len() {
            return Err(CrosslinkError::Validation(format!(
                "row has {} cells but the table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names in declaration order.
    pub fn columns(&self) -> &[ColumnName] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Position of `column` in the layout, if present.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }

    /// True when the layout contains `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Resolve `column` to its position, or fail with `MissingColumn`.
    pub fn require_column(&self, column: &str) -> Result<usize, CrosslinkError> {
        self.column_index(column)
            .ok_or_else(|| CrosslinkError::MissingColumn(column.to_string()))
    }

    /// Cell at `(row, column index)`, if in range.
    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// Iterate rows in insertion order.
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Keep only the rows satisfying `keep`.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[CellValue]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    /// Append a column with one value per existing row.
    pub fn push_column<S>(&mut self, column: S, values: Vec<CellValue>) -> Result<(), CrosslinkError>
    where
        S: Into<ColumnName>,
    {
        let column = column.into();
        if self.has_column(&column) {
            return Err(CrosslinkError::Validation(format!(
                "column '{column}' already exists"
            )));
        }
        if values.len() != self.rows.len() {
            return Err(CrosslinkError::Validation(format!(
                "column '{column}' has {} values but the table has {} rows",
                values.len(),
                self.rows.len()
            )));
        }
        self.columns.push(column);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// Remove `column` and its cells from every row.
    pub fn drop_column(&mut self, column: &str) -> Result<(), CrosslinkError> {
        let idx = self.require_column(column)?;
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        Ok(())
    }
}

/// Render a cell for identifier and text use: strings bare, nulls empty,
/// everything else as compact JSON.
pub fn cell_text(value: &CellValue) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
