//! Scan result types.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Local};

use crate::domain::Domain;

/// A URL judged to point at a potentially sensitive file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Finding(String);

impl Finding {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Counters collected while a scan runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Queries dispatched.
    pub queries: usize,
    /// Queries whose search failed and contributed nothing.
    pub failed_queries: usize,
    /// Links returned by the search engine before classification.
    pub links_seen: usize,
}

/// Outcome of one scan. Built once by the scanner and not modified afterwards.
#[derive(Debug, Clone)]
pub struct ScanResult {
    domain: Domain,
    started_at: DateTime<Local>,
    findings: BTreeSet<Finding>,
    stats: ScanStats,
}

impl ScanResult {
    pub fn new(
        domain: Domain,
        started_at: DateTime<Local>,
        findings: impl IntoIterator<Item = Finding>,
        stats: ScanStats,
    ) -> Self {
        Self {
            domain,
            started_at,
            findings: findings.into_iter().collect(),
            stats,
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Unique findings in sorted order.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn findings_are_unique() {
        let result = ScanResult::new(
            Domain::parse("example.com").unwrap(),
            Local::now(),
            vec![
                Finding::new("https://example.com/b.sql"),
                Finding::new("https://example.com/a.env"),
                Finding::new("https://example.com/b.sql"),
            ],
            ScanStats::default(),
        );

        assert_eq!(result.len(), 2);
        let urls: Vec<&str> = result.findings().map(|f| f.url()).collect();
        assert_eq!(
            urls,
            vec!["https://example.com/a.env", "https://example.com/b.sql"]
        );
    }
}
