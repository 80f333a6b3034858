use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::constants::email::EMAIL_PATTERN;
use crate::errors::CrosslinkError;
use crate::table::{cell_text, Table};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

/// True when `email` meets common address requirements: a non-empty local
/// part, `@`, and a dotted domain ending in an alphabetic TLD of at least
/// two letters. Pure, no side effects.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Drop rows whose `email_column` cell is not a syntactically valid
/// address. The input table is untouched; a cleaned copy is returned.
pub fn retain_valid_emails(table: &Table, email_column: &str) -> Result<Table, CrosslinkError> {
    let idx = table.require_column(email_column)?;
    let mut cleaned = table.clone();
    let before = cleaned.len();
    cleaned.retain_rows(|row| is_valid_email(&cell_text(&row[idx])));
    debug!(
        column = email_column,
        dropped = before - cleaned.len(),
        kept = cleaned.len(),
        "filtered rows with invalid email syntax"
    );
    Ok(cleaned)
}
