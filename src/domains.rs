use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::constants::domains::REFERENCE_COLUMN;
use crate::constants::email::DOMAIN_SEPARATOR;
use crate::errors::CrosslinkError;
use crate::table::{cell_text, Table};
use crate::types::DomainName;

/// Count summary produced by stripping public-domain rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainSummary {
    /// Rows inspected, before filtering.
    pub total_rows: usize,
    /// Distinct public domains that matched at least one row.
    pub matched_domains: usize,
    /// Rows dropped because their domain is public.
    pub matched_rows: usize,
    /// Per-domain drop counts, descending by count then domain.
    pub per_domain: Vec<(DomainName, usize)>,
}

impl fmt::Display for DomainSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total email addresses: {}", self.total_rows)?;
        writeln!(
            f,
            "Number of public domain types found: {}",
            self.matched_domains
        )?;
        writeln!(f, "Total public domain emails: {}", self.matched_rows)?;
        writeln!(f)?;
        writeln!(f, "Counts for each public domain:")?;
        for (domain, count) in &self.per_domain {
            writeln!(f, "{domain}: {count}")?;
        }
        Ok(())
    }
}

/// Load the public-domain reference list from a single-column CSV file.
///
/// A leading header row equal to the canonical column name is skipped;
/// blank lines are ignored.
pub fn load_public_domains(path: &Path) -> Result<HashSet<DomainName>, CrosslinkError> {
    let raw = fs::read_to_string(path)?;
    let mut domains = HashSet::new();
    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || (idx == 0 && line == REFERENCE_COLUMN) {
            continue;
        }
        domains.insert(line.to_string());
    }
    Ok(domains)
}

/// Domain of an address: the text between the first and second `@`, if any.
pub fn email_domain(email: &str) -> Option<&str> {
    email
        .split(DOMAIN_SEPARATOR)
        .nth(1)
        .filter(|domain| !domain.is_empty())
}

/// Remove rows whose email domain appears in the public reference set.
///
/// Returns the cleaned table together with a [`DomainSummary`]; rows
/// without an extractable domain never match. The summary is also emitted
/// to the log.
pub fn strip_public_domains(
    table: &Table,
    email_column: &str,
    public_domains: &HashSet<DomainName>,
) -> Result<(Table, DomainSummary), CrosslinkError> {
    let idx = table.require_column(email_column)?;

    let mut counts: HashMap<DomainName, usize> = HashMap::new();
    let mut cleaned = Table::new(table.columns().iter().cloned());
    for row in table.rows() {
        let email = cell_text(&row[idx]);
        match email_domain(&email) {
            Some(domain) if public_domains.contains(domain) => {
                *counts.entry(domain.to_string()).or_default() += 1;
            }
            _ => cleaned.push_row(row.to_vec())?,
        }
    }

    let matched_rows = counts.values().sum();
    let mut per_domain: Vec<(DomainName, usize)> = counts.into_iter().collect();
    per_domain.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let summary = DomainSummary {
        total_rows: table.len(),
        matched_domains: per_domain.len(),
        matched_rows,
        per_domain,
    };
    info!(
        total_rows = summary.total_rows,
        matched_rows = summary.matched_rows,
        matched_domains = summary.matched_domains,
        "stripped public email domains"
    );
    Ok((cleaned, summary))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::constants::domains::DEFAULT_REFERENCE_FILE;

    fn email_table(emails: &[&str]) -> Table {
        let mut table = Table::new(["email"]);
        for email in emails {
            table.push_row([json!(email)]).unwrap();
        }
        table
    }

    fn reference(domains: &[&str]) -> HashSet<DomainName> {
        domains.iter().map(|domain| domain.to_string()).collect()
    }

    #[test]
    fn email_domain_takes_text_after_the_first_at() {
        assert_eq!(email_domain("a@b.com"), Some("b.com"));
        assert_eq!(email_domain("no-at-sign"), None);
        assert_eq!(email_domain("trailing@"), None);
    }

    #[test]
    fn strip_drops_matching_rows_and_counts_them() {
        let table = email_table(&[
            "a@gmail.com",
            "b@corp.example",
            "c@gmail.com",
            "d@yahoo.com",
            "no-domain",
        ]);
        let (cleaned, summary) =
            strip_public_domains(&table, "email", &reference(&["gmail.com", "yahoo.com"]))
                .unwrap();

        assert_eq!(cleaned.len(), 2);
        assert_eq!(summary.total_rows, 5);
        assert_eq!(summary.matched_rows, 3);
        assert_eq!(summary.matched_domains, 2);
        assert_eq!(
            summary.per_domain,
            vec![("gmail.com".to_string(), 2), ("yahoo.com".to_string(), 1)]
        );
    }

    #[test]
    fn strip_requires_the_email_column() {
        let table = Table::new(["name"]);
        let result = strip_public_domains(&table, "email", &reference(&["gmail.com"]));
        assert!(matches!(result, Err(CrosslinkError::MissingColumn(_))));
    }

    #[test]
    fn summary_display_lists_the_report_lines() {
        let summary = DomainSummary {
            total_rows: 3,
            matched_domains: 1,
            matched_rows: 2,
            per_domain: vec![("gmail.com".to_string(), 2)],
        };
        let text = summary.to_string();
        assert!(text.contains("Total email addresses: 3"));
        assert!(text.contains("Number of public domain types found: 1"));
        assert!(text.contains("Total public domain emails: 2"));
        assert!(text.contains("gmail.com: 2"));
    }

    #[test]
    fn loader_skips_header_and_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_REFERENCE_FILE);
        fs::write(&path, "public_email_domain\ngmail.com\n\nyahoo.com\n").unwrap();

        let domains = load_public_domains(&path).unwrap();
        assert_eq!(domains, reference(&["gmail.com", "yahoo.com"]));
    }
}
