//! Scan report files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::models::ScanResult;

/// Timestamp format used in report file names.
const FILENAME_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

/// Timestamp format written inside reports.
const SCAN_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors writing a report. Fatal for the invocation.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Txt,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Txt => "txt",
            ReportFormat::Json => "json",
        }
    }
}

/// Structured report body.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    domain: &'a str,
    scan_date: String,
    total_found: usize,
    sensitive_files: Vec<&'a str>,
}

/// File name for a report: `scan_results_{domain}_{YYYYMMDD_HHMMSS}.{ext}`.
pub fn report_filename(result: &ScanResult, format: ReportFormat) -> String {
    format!(
        "scan_results_{}_{}.{}",
        result.domain(),
        result.started_at().format(FILENAME_TIMESTAMP),
        format.extension()
    )
}

/// Render the human-readable report: three header lines, a blank line, then
/// one URL per line.
pub fn render_txt(result: &ScanResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Google Dork Scan Results for: {}\n", result.domain()));
    out.push_str(&format!(
        "Scan date: {}\n",
        result.started_at().format(SCAN_DATE_FORMAT)
    ));
    out.push_str(&format!("Total sensitive files found: {}\n\n", result.len()));
    for finding in result.findings() {
        out.push_str(finding.url());
        out.push('\n');
    }
    out
}

/// Render the structured report.
pub fn render_json(result: &ScanResult) -> Result<String, ReportError> {
    let report = JsonReport {
        domain: result.domain().as_str(),
        scan_date: result.started_at().format(SCAN_DATE_FORMAT).to_string(),
        total_found: result.len(),
        sensitive_files: result.findings().map(|f| f.url()).collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Write a report into `dir` and return its path.
pub fn write_report(
    dir: &Path,
    result: &ScanResult,
    format: ReportFormat,
) -> Result<PathBuf, ReportError> {
    let contents = match format {
        ReportFormat::Txt => render_txt(result),
        ReportFormat::Json => render_json(result)?,
    };

    let path = dir.join(report_filename(result, format));
    fs::write(&path, contents).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;

    info!("Wrote {} report to {}", format.extension(), path.display());
    Ok(path)
}
