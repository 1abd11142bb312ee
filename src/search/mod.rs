//! Search engine access.
//!
//! [`SearchClient`] talks to the real engine; anything implementing
//! [`SearchBackend`] can stand in for it when driving a scan.

mod client;
pub mod extract;
mod pacer;
mod user_agent;

pub use client::SearchClient;
pub use extract::LinkExtractor;
pub use pacer::Pacer;
pub use user_agent::{resolve_user_agent, IMPERSONATE_USER_AGENTS, USER_AGENT};

use async_trait::async_trait;

/// Errors from a single search query.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search engine returned {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid search endpoint: {0}")]
    Endpoint(String),
}

impl SearchError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SearchError::Http(e) => e.is_timeout() || e.is_connect(),
            SearchError::Status(status) => status.as_u16() == 429 || status.is_server_error(),
            SearchError::Endpoint(_) => false,
        }
    }
}

/// Something that turns a query into result links.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one query and return the links found, excluding the engine's own.
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError>;
}
