//! Built-in dork catalog.
//!
//! Every template restricts the search to the target with `site:{domain}` and
//! adds operators that surface one kind of exposed file.

use std::fmt;
use std::sync::LazyLock;

use crate::domain::Domain;

/// Name of the single substitution slot.
const DOMAIN_SLOT: &str = "{domain}";

/// What kind of exposure a dork is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DorkCategory {
    Configuration,
    Database,
    Logs,
    Backups,
    SourceCode,
    Credentials,
    Admin,
    Directories,
    ApiKeys,
    EmailLists,
    Documents,
    SshKeys,
    Cloud,
    DatabaseDumps,
}

impl DorkCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration files",
            Self::Database => "database files",
            Self::Logs => "log files",
            Self::Backups => "backup files",
            Self::SourceCode => "source code",
            Self::Credentials => "credential files",
            Self::Admin => "admin pages",
            Self::Directories => "sensitive directories",
            Self::ApiKeys => "api keys and tokens",
            Self::EmailLists => "email lists",
            Self::Documents => "document files",
            Self::SshKeys => "ssh keys",
            Self::Cloud => "cloud credentials",
            Self::DatabaseDumps => "database dumps",
        }
    }
}

impl fmt::Display for DorkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while loading a template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template has no {{domain}} slot: {0}")]
    MissingSlot(String),

    #[error("template has more than one {{domain}} slot: {0}")]
    RepeatedSlot(String),

    #[error("template has an unknown slot: {0}")]
    UnknownSlot(String),
}

/// A search query with exactly one `{domain}` slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DorkTemplate {
    category: DorkCategory,
    prefix: String,
    suffix: String,
}

impl DorkTemplate {
    /// Parse and validate a raw template.
    pub fn parse(category: DorkCategory, raw: &str) -> Result<Self, TemplateError> {
        let mut parts = raw.split(DOMAIN_SLOT);
        let prefix = parts.next().unwrap_or_default();
        let suffix = match parts.next() {
            Some(s) => s,
            None => return Err(TemplateError::MissingSlot(raw.to_string())),
        };
        if parts.next().is_some() {
            return Err(TemplateError::RepeatedSlot(raw.to_string()));
        }
        if [prefix, suffix]
            .iter()
            .any(|p| p.contains('{') || p.contains('}'))
        {
            return Err(TemplateError::UnknownSlot(raw.to_string()));
        }

        Ok(Self {
            category,
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
    }

    pub fn category(&self) -> DorkCategory {
        self.category
    }

    /// Substitute the target domain into the slot.
    pub fn render(&self, domain: &Domain) -> String {
        format!("{}{}{}", self.prefix, domain, self.suffix)
    }
}

impl fmt::Display for DorkTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, DOMAIN_SLOT, self.suffix)
    }
}

const RAW_DORKS: &[(DorkCategory, &str)] = &[
    (DorkCategory::Configuration, "site:{domain} filetype:env"),
    (DorkCategory::Configuration, r#"site:{domain} "DB_PASSWORD""#),
    (DorkCategory::Configuration, r#"site:{domain} "API_KEY""#),
    (DorkCategory::Configuration, r#"site:{domain} "config" ext:json"#),
    (DorkCategory::Configuration, r#"site:{domain} "config" ext:yml"#),
    (DorkCategory::Configuration, r#"site:{domain} "config" ext:yaml"#),
    (DorkCategory::Configuration, r#"site:{domain} "configuration" ext:xml"#),
    (DorkCategory::Database, "site:{domain} filetype:sql"),
    (DorkCategory::Database, r#"site:{domain} "dump" ext:sql"#),
    (DorkCategory::Database, r#"site:{domain} "backup" ext:sql"#),
    (DorkCategory::Database, "site:{domain} filetype:db"),
    (DorkCategory::Database, "site:{domain} filetype:mdb"),
    (DorkCategory::Logs, "site:{domain} filetype:log"),
    (DorkCategory::Logs, r#"site:{domain} "error.log""#),
    (DorkCategory::Logs, r#"site:{domain} "access.log""#),
    (DorkCategory::Backups, r#"site:{domain} "backup" ext:zip"#),
    (DorkCategory::Backups, r#"site:{domain} "backup" ext:tar"#),
    (DorkCategory::Backups, r#"site:{domain} "backup" ext:gz"#),
    (DorkCategory::Backups, r#"site:{domain} "backup" ext:bak"#),
    (DorkCategory::Backups, r#"site:{domain} "backup" ext:rar"#),
    (DorkCategory::SourceCode, "site:{domain} filetype:git"),
    (DorkCategory::SourceCode, r#"site:{domain} ".git" intitle:"index of""#),
    (DorkCategory::SourceCode, "site:{domain} filetype:svn"),
    (DorkCategory::Credentials, r#"site:{domain} "password" ext:txt"#),
    (DorkCategory::Credentials, r#"site:{domain} "username" ext:txt"#),
    (DorkCategory::Credentials, r#"site:{domain} "login" ext:csv"#),
    (DorkCategory::Credentials, r#"site:{domain} "credentials" ext:txt"#),
    (DorkCategory::Admin, r#"site:{domain} "admin" ext:php"#),
    (DorkCategory::Admin, r#"site:{domain} "admin" ext:asp"#),
    (DorkCategory::Admin, r#"site:{domain} "administrator""#),
    (DorkCategory::Admin, r#"site:{domain} intitle:"admin""#),
    (DorkCategory::Directories, r#"site:{domain} intitle:"index of" "/.git/""#),
    (DorkCategory::Directories, r#"site:{domain} intitle:"index of" "/backup/""#),
    (DorkCategory::Directories, r#"site:{domain} intitle:"index of" "/config/""#),
    (DorkCategory::Directories, r#"site:{domain} intitle:"index of" "/database/""#),
    (DorkCategory::Directories, r#"site:{domain} intitle:"index of" "/sql/""#),
    (DorkCategory::ApiKeys, r#"site:{domain} "api_key""#),
    (DorkCategory::ApiKeys, r#"site:{domain} "secret_key""#),
    (DorkCategory::ApiKeys, r#"site:{domain} "access_token""#),
    (DorkCategory::ApiKeys, r#"site:{domain} "refresh_token""#),
    (DorkCategory::EmailLists, r#"site:{domain} filetype:csv "email""#),
    (DorkCategory::EmailLists, r#"site:{domain} "email" ext:xls"#),
    (DorkCategory::EmailLists, r#"site:{domain} "email" ext:xlsx"#),
    (DorkCategory::Documents, r#"site:{domain} filetype:pdf "confidential""#),
    (DorkCategory::Documents, r#"site:{domain} filetype:doc "password""#),
    (DorkCategory::Documents, r#"site:{domain} filetype:xls "financial""#),
    (DorkCategory::SshKeys, r#"site:{domain} "BEGIN RSA PRIVATE KEY""#),
    (DorkCategory::SshKeys, r#"site:{domain} "BEGIN PRIVATE KEY""#),
    (DorkCategory::SshKeys, r#"site:{domain} "ssh-rsa""#),
    (DorkCategory::Cloud, r#"site:{domain} "aws_access_key""#),
    (DorkCategory::Cloud, r#"site:{domain} "AKIA""#),
    (DorkCategory::Cloud, r#"site:{domain} "s3.amazonaws.com""#),
    (DorkCategory::DatabaseDumps, r#"site:{domain} "phpMyAdmin" "sql""#),
    (DorkCategory::DatabaseDumps, r#"site:{domain} "MySQL dump""#),
    (DorkCategory::DatabaseDumps, r#"site:{domain} "Database dump""#),
];

static CATALOG: LazyLock<Vec<DorkTemplate>> = LazyLock::new(|| {
    RAW_DORKS
        .iter()
        .filter_map(|(category, raw)| match DorkTemplate::parse(*category, raw) {
            Ok(template) => Some(template),
            Err(e) => {
                tracing::error!("Skipping built-in dork: {}", e);
                None
            }
        })
        .collect()
});

/// The built-in templates, in search order.
pub fn catalog() -> &'static [DorkTemplate] {
    &CATALOG
}
