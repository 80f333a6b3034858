use std::io;

use thiserror::Error;

use crate::types::ColumnName;

/// Error type for schema validation, collaborator input checks, and file IO.
#[derive(Debug, Error)]
pub enum CrosslinkError {
    /// A required column name is absent from the input table. Raised before
    /// any node is registered, so a failed call has no observable effects.
    #[error("column '{0}' not found in table")]
    MissingColumn(ColumnName),
    /// Input data has the wrong shape (e.g. a map column holding a scalar).
    #[error("invalid input: {0}")]
    Validation(String),
    /// A configuration knob is out of range or inconsistent.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// File read/write failure during export or reference-list loading.
    #[error(transparent)]
    Io(#[from] io::Error),
}
