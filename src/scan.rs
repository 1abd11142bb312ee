//! Scan orchestration.
//!
//! Renders every dork for the target, runs the searches through a bounded
//! pool, and keeps the links that look sensitive. Each query task sleeps for
//! the configured delay after its search, so the effective request rate grows
//! with the worker count; set `min_interval_ms` for a global pace instead.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::classify::{matched_indicator, Indicator};
use crate::config::ScanSettings;
use crate::domain::Domain;
use crate::dorks::{self, DorkTemplate};
use crate::models::{Finding, ScanResult, ScanStats};
use crate::search::{SearchBackend, SearchError};

/// Receives progress events while a scan runs.
///
/// Called concurrently from every in-flight query.
pub trait ScanProgress: Send + Sync {
    fn query_started(&self, _template: &DorkTemplate, _query: &str) {}

    fn finding(&self, _finding: &Finding, _indicator: Indicator) {}

    fn query_finished(&self, _query: &str, _error: Option<&SearchError>) {}
}

/// Progress sink that ignores every event.
pub struct NoProgress;

impl ScanProgress for NoProgress {}

/// What one dork contributed.
#[derive(Debug, Default)]
struct DorkOutcome {
    findings: Vec<Finding>,
    links_seen: usize,
    failed: bool,
}

/// Runs the dork catalog against a domain.
pub struct Scanner<B: ?Sized> {
    backend: Arc<B>,
    workers: usize,
    delay: Duration,
    progress: Arc<dyn ScanProgress>,
}

impl<B: SearchBackend + ?Sized> Scanner<B> {
    /// Scanner with 5 workers and a 2 second per-query delay.
    pub fn new(backend: Arc<B>) -> Self {
        let defaults = ScanSettings::default();
        Self {
            backend,
            workers: defaults.workers,
            delay: defaults.delay(),
            progress: Arc::new(NoProgress),
        }
    }

    /// Scanner using the worker count and delay from `settings`.
    pub fn from_settings(backend: Arc<B>, settings: &ScanSettings) -> Self {
        Self::new(backend)
            .with_workers(settings.workers)
            .with_delay(settings.delay())
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ScanProgress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run the built-in catalog.
    pub async fn scan(&self, domain: &Domain) -> ScanResult {
        self.scan_templates(domain, dorks::catalog()).await
    }

    /// Run the given templates. Failed queries contribute nothing; the scan
    /// itself never fails.
    pub async fn scan_templates(&self, domain: &Domain, templates: &[DorkTemplate]) -> ScanResult {
        let started_at = Local::now();
        info!(
            "Starting scan for {} with {} dorks and {} workers",
            domain,
            templates.len(),
            self.workers
        );

        let outcomes: Vec<DorkOutcome> = stream::iter(templates)
            .map(|template| self.run_dork(domain, template))
            .buffer_unordered(self.workers)
            .collect()
            .await;

        // Merge after the pool drains; nothing is shared during the fan-out.
        let mut stats = ScanStats {
            queries: outcomes.len(),
            ..Default::default()
        };
        let mut findings = BTreeSet::new();
        for outcome in outcomes {
            stats.links_seen += outcome.links_seen;
            if outcome.failed {
                stats.failed_queries += 1;
            }
            findings.extend(outcome.findings);
        }

        info!(
            "Scan for {} finished: {} findings from {} links ({} failed queries)",
            domain,
            findings.len(),
            stats.links_seen,
            stats.failed_queries
        );

        ScanResult::new(domain.clone(), started_at, findings, stats)
    }

    async fn run_dork(&self, domain: &Domain, template: &DorkTemplate) -> DorkOutcome {
        let query = template.render(domain);
        debug!(category = %template.category(), "Searching: {}", query);
        self.progress.query_started(template, &query);

        let mut outcome = DorkOutcome::default();
        match self.backend.search(&query).await {
            Ok(links) => {
                outcome.links_seen = links.len();
                for link in links {
                    if let Some(indicator) = matched_indicator(&link) {
                        let finding = Finding::new(link);
                        info!("Found {} ({})", finding, indicator);
                        self.progress.finding(&finding, indicator);
                        outcome.findings.push(finding);
                    }
                }
                self.progress.query_finished(&query, None);
            }
            Err(e) => {
                warn!("Error searching for {}: {}", query, e);
                outcome.failed = true;
                self.progress.query_finished(&query, Some(&e));
            }
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        outcome
    }
}
