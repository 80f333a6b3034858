use std::fmt::Write as _;
use std::sync::{LazyLock, RwLock};

use crate::constants::preview::{
    CELL_SEPARATOR, DEFAULT_MAX_COL_WIDTH, DEFAULT_MAX_COLUMNS, DEFAULT_MAX_ROWS, ELISION_MARKER,
    PREVIEW_ROWS,
};
use crate::table::{cell_text, Table};

/// Render caps applied when formatting tables as text. `None` lifts a cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayLimits {
    /// Max rows rendered.
    pub max_rows: Option<usize>,
    /// Max columns rendered; extra columns collapse into an elision marker.
    pub max_columns: Option<usize>,
    /// Max cell width in characters.
    pub max_col_width: Option<usize>,
}

impl DisplayLimits {
    /// Caps used outside an explicit preview.
    pub fn standard() -> Self {
        Self {
            max_rows: Some(DEFAULT_MAX_ROWS),
            max_columns: Some(DEFAULT_MAX_COLUMNS),
            max_col_width: Some(DEFAULT_MAX_COL_WIDTH),
        }
    }

    /// No caps at all.
    pub fn unlimited() -> Self {
        Self {
            max_rows: None,
            max_columns: None,
            max_col_width: None,
        }
    }
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self::standard()
    }
}

static ACTIVE_LIMITS: LazyLock<RwLock<DisplayLimits>> =
    LazyLock::new(|| RwLock::new(DisplayLimits::standard()));

/// Serializes unit tests that read or swap the process-wide limits.
#[cfg(test)]
pub(crate) static LIMITS_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// The currently active render caps.
pub fn active_limits() -> DisplayLimits {
    *ACTIVE_LIMITS.read().expect("display limits poisoned")
}

/// Scoped override of the process-wide render caps.
///
/// Construction saves the prior limits and swaps in the temporary ones;
/// dropping the guard restores the saved limits on every exit path,
/// including unwinding.
pub struct DisplayLimitsGuard {
    saved: DisplayLimits,
}

impl DisplayLimitsGuard {
    /// Apply `limits` until the guard is dropped.
    pub fn set(limits: DisplayLimits) -> Self {
        let mut active = ACTIVE_LIMITS.write().expect("display limits poisoned");
        let saved = *active;
        *active = limits;
        Self { saved }
    }
}

impl Drop for DisplayLimitsGuard {
    fn drop(&mut self) {
        if let Ok(mut active) = ACTIVE_LIMITS.write() {
            *active = self.saved;
        }
    }
}

/// Render `table` as an aligned text grid under the active limits.
pub fn render(table: &Table) -> String {
    render_head(table, active_limits(), usize::MAX)
}

/// Show up to the first ten rows of `table` with all caps lifted for the
/// duration of the call; prior limits are restored afterwards regardless
/// of how the call exits.
pub fn preview(table: &Table) -> String {
    let _guard = DisplayLimitsGuard::set(DisplayLimits::unlimited());
    render_head(table, active_limits(), PREVIEW_ROWS)
}

fn render_head(table: &Table, limits: DisplayLimits, head: usize) -> String {
    let shown_columns = limits
        .max_columns
        .unwrap_or(usize::MAX)
        .min(table.width());
    let elided = shown_columns < table.width();
    let shown_rows = limits.max_rows.unwrap_or(usize::MAX).min(head).min(table.len());

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(shown_rows + 1);
    grid.push(
        table.columns()[..shown_columns]
            .iter()
            .map(|name| clip(name, limits.max_col_width))
            .collect(),
    );
    for row_idx in 0..shown_rows {
        grid.push(
            (0..shown_columns)
                .map(|col| {
                    let text = table.cell(row_idx, col).map(cell_text).unwrap_or_default();
                    clip(&text, limits.max_col_width)
                })
                .collect(),
        );
    }

    let mut widths = vec![0usize; shown_columns];
    for line in &grid {
        for (col, text) in line.iter().enumerate() {
            widths[col] = widths[col].max(text.chars().count());
        }
    }

    let mut out = String::new();
    for line in &grid {
        let mut rendered = Vec::with_capacity(shown_columns + 1);
        for (col, text) in line.iter().enumerate() {
            rendered.push(format!("{text:<width$}", width = widths[col]));
        }
        if elided {
            rendered.push(ELISION_MARKER.to_string());
        }
        let _ = writeln!(out, "{}", rendered.join(CELL_SEPARATOR).trim_end());
    }
    if shown_rows < table.len() {
        let _ = writeln!(out, "({} rows total)", table.len());
    }
    out
}

fn clip(text: &str, max_width: Option<usize>) -> String {
    let Some(max_width) = max_width else {
        return text.to_string();
    };
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let kept: String = text
        .chars()
        .take(max_width.saturating_sub(ELISION_MARKER.len()))
        .collect();
    format!("{kept}{ELISION_MARKER}")
}
