//! Scan progress display.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use dorkscan::classify::Indicator;
use dorkscan::dorks::DorkTemplate;
use dorkscan::scan::ScanProgress;
use dorkscan::{Finding, SearchError};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} dorks {msg}";

/// Progress bar over the dork catalog that prints queries and hits above it.
pub struct ScanProgressBar {
    bar: ProgressBar,
}

impl ScanProgressBar {
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

impl ScanProgress for ScanProgressBar {
    fn query_started(&self, _template: &DorkTemplate, query: &str) {
        self.bar
            .println(format!("{} Searching: {}", style("[+]").cyan(), query));
    }

    fn finding(&self, finding: &Finding, _indicator: Indicator) {
        self.bar
            .println(format!("    {} {}", style("FOUND:").red().bold(), finding));
    }

    fn query_finished(&self, _query: &str, error: Option<&SearchError>) {
        if error.is_some() {
            self.bar.set_message(style("(some queries failed)").yellow().to_string());
        }
        self.bar.inc(1);
    }
}
