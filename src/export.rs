use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::constants::export::FILE_EXTENSION;
use crate::errors::CrosslinkError;
use crate::table::{cell_text, Table};

/// Split `table` into `ceil(rows / max_lines)` CSV files named
/// `{base_name}_{1..N}.csv`, each holding at most `max_lines` rows in the
/// original row order.
///
/// `header` controls whether every file starts with the column-name line.
/// An empty table writes no files. Returns the number of files written; a
/// write failure mid-run reports how many files completed, then propagates.
pub fn export_chunked(
    table: &Table,
    max_lines: usize,
    base_name: &str,
    header: bool,
) -> Result<usize, CrosslinkError> {
    if max_lines == 0 {
        return Err(CrosslinkError::Configuration(
            "max_lines must be a positive integer".to_string(),
        ));
    }

    let total = table.len();
    let file_count = total.div_ceil(max_lines);
    let mut files_written = 0usize;
    for chunk in 0..file_count {
        let start = chunk * max_lines;
        let end = (start + max_lines).min(total);
        let path = chunk_path(base_name, chunk + 1);
        if let Err(error) = write_chunk(table, start..end, &path, header) {
            warn!(
                files_written,
                path = %path.display(),
                "chunked export aborted mid-run"
            );
            return Err(error);
        }
        files_written += 1;
    }

    info!(files_written, rows = total, base_name, "chunked export complete");
    Ok(files_written)
}

fn chunk_path(base_name: &str, index: usize) -> PathBuf {
    PathBuf::from(format!("{base_name}_{index}.{FILE_EXTENSION}"))
}

fn write_chunk(
    table: &Table,
    rows: Range<usize>,
    path: &Path,
    header: bool,
) -> Result<(), CrosslinkError> {
    let mut out = String::new();
    if header {
        out.push_str(&csv_line(table.columns().iter().map(String::as_str)));
    }
    for row_idx in rows {
        let cells: Vec<String> = (0..table.width())
            .map(|col| {
                table
                    .cell(row_idx, col)
                    .map(cell_text)
                    .unwrap_or_default()
            })
            .collect();
        out.push_str(&csv_line(cells.iter().map(String::as_str)));
    }
    fs::write(path, out)?;
    Ok(())
}

fn csv_line<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    let mut line = fields.map(csv_field).collect::<Vec<_>>().join(",");
    line.push('\n');
    line
}

/// Quote a field when it contains a delimiter, quote, or line break;
/// embedded quotes are doubled.
fn csv_field(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\r') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
