//! Sensitive-file heuristics for result URLs.
//!
//! Matching is a plain case-insensitive substring test over the whole URL,
//! with no URL structure parsing. It over-matches: `admin` anywhere in a path
//! or `api` inside an unrelated word both count. Those false positives are
//! expected and left in the report for a human to triage.

/// File extensions that usually should not be publicly indexed.
pub const SENSITIVE_EXTENSIONS: &[&str] = &[
    ".env", ".sql", ".db", ".mdb", ".log", ".bak", ".zip", ".tar", ".gz", ".rar", ".key", ".pem",
    ".ppk", ".csv", ".xls", ".xlsx", ".doc", ".docx", ".pdf", ".json", ".yml", ".yaml", ".xml",
    ".config",
];

/// Keywords that hint at secrets or internal tooling.
pub const SENSITIVE_KEYWORDS: &[&str] = &[
    "config",
    "backup",
    "dump",
    "password",
    "credential",
    "admin",
    "secret",
    "key",
    "database",
    "sql",
    "log",
    "private",
    "ssh",
    "aws",
    "api",
];

/// Why a URL was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Extension(&'static str),
    Keyword(&'static str),
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Indicator::Extension(ext) => write!(f, "extension {}", ext),
            Indicator::Keyword(kw) => write!(f, "keyword '{}'", kw),
        }
    }
}

/// Return the first indicator found in `url`, extensions checked first.
pub fn matched_indicator(url: &str) -> Option<Indicator> {
    let url_lower = url.to_lowercase();

    if let Some(ext) = SENSITIVE_EXTENSIONS
        .iter()
        .find(|ext| url_lower.contains(*ext))
    {
        return Some(Indicator::Extension(*ext));
    }

    SENSITIVE_KEYWORDS
        .iter()
        .find(|kw| url_lower.contains(*kw))
        .map(|kw| Indicator::Keyword(*kw))
}

/// Check whether a URL looks like an exposed sensitive file.
pub fn is_sensitive(url: &str) -> bool {
    matched_indicator(url).is_some()
}
