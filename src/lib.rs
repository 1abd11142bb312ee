//! dorkscan - search-engine dork scanner for exposed sensitive files.
//!
//! Runs a fixed catalog of search queries restricted to one domain, keeps the
//! result links that look like sensitive files, and writes them to a report.

pub mod classify;
pub mod config;
pub mod domain;
pub mod dorks;
pub mod models;
pub mod report;
pub mod scan;
pub mod search;

pub use config::ScanSettings;
pub use domain::{Domain, ValidationError};
pub use models::{Finding, ScanResult, ScanStats};
pub use report::{write_report, ReportError, ReportFormat};
pub use scan::Scanner;
pub use search::{SearchBackend, SearchClient, SearchError};
