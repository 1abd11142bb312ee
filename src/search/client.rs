//! HTTP search client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::extract::{dedup_and_limit, LinkExtractor};
use super::pacer::Pacer;
use super::user_agent::resolve_user_agent;
use super::{SearchBackend, SearchError};
use crate::config::ScanSettings;

/// Web search client shared by every scan worker.
///
/// One `reqwest::Client` (connection pool, cookie jar, headers) serves all
/// queries.
#[derive(Debug)]
pub struct SearchClient {
    client: Client,
    endpoint: Url,
    extractor: LinkExtractor,
    max_results: usize,
    results_per_page: u32,
    retries: u32,
    retry_backoff: Duration,
    pacer: Pacer,
}

impl SearchClient {
    /// Build a client from scan settings.
    pub fn from_settings(settings: &ScanSettings) -> Result<Self, SearchError> {
        let endpoint = Url::parse(&settings.search_url)
            .map_err(|e| SearchError::Endpoint(format!("{}: {}", settings.search_url, e)))?;
        if endpoint.host_str().is_none() {
            return Err(SearchError::Endpoint(settings.search_url.clone()));
        }

        let user_agent = resolve_user_agent(settings.user_agent.as_deref());
        let client = Client::builder()
            .user_agent(&user_agent)
            .timeout(settings.timeout())
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            extractor: LinkExtractor::for_endpoint(&endpoint),
            endpoint,
            max_results: settings.max_results,
            results_per_page: settings.results_per_page,
            retries: settings.retries,
            retry_backoff: settings.retry_backoff(),
            pacer: Pacer::new(settings.min_interval()),
        })
    }

    /// Use a specific extractor instead of the one derived from the endpoint.
    pub fn with_extractor(mut self, extractor: LinkExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// One request, no retry.
    async fn fetch(&self, query: &str) -> Result<Vec<String>, SearchError> {
        self.pacer.acquire().await;

        let num = self.results_per_page.to_string();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("q", query), ("num", num.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = response.text().await?;
        let mut links: Vec<String> = self.extractor.extract(&body).into_iter().collect();
        dedup_and_limit(&mut links, self.max_results);

        debug!("Parsed {} links for '{}'", links.len(), query);
        Ok(links)
    }
}

#[async_trait]
impl SearchBackend for SearchClient {
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let mut attempt = 0;
        loop {
            match self.fetch(query).await {
                Ok(links) => return Ok(links),
                Err(e) if attempt < self.retries && e.is_transient() => {
                    attempt += 1;
                    let wait = self.retry_backoff * attempt;
                    warn!(
                        "Search failed for '{}' ({}), retry {}/{} in {:?}",
                        query, e, attempt, self.retries, wait
                    );
                    tokio::time::sleep(wait).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
