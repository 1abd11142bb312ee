//! Search client tests against a mock search engine.

use std::time::Duration;

use dorkscan::{ScanSettings, SearchBackend, SearchClient, SearchError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RESULTS_PAGE: &str = r#"<!doctype html>
<html><body>
<div class="g"><a href="/url?q=https://example.com/backup.sql&amp;sa=U">backup</a></div>
<div class="g"><a href="https://example.com/.env">env</a></div>
<div class="g"><a href="https://example.com/about">about</a></div>
<a href="https://www.google.com/intl/en/policies">policies</a>
<a href="https://webcache.googleusercontent.com/search?q=cache:xyz">cache</a>
</body></html>"#;

fn settings_for(server: &MockServer) -> ScanSettings {
    ScanSettings {
        search_url: format!("{}/search", server.uri()),
        timeout_secs: 2,
        retry_backoff_ms: 10,
        ..Default::default()
    }
}

#[tokio::test]
async fn search_sends_query_and_extracts_links() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", r#"site:example.com "backup" ext:sql"#))
        .and(query_param("num", "100"))
        .and(header(
            "user-agent",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let client = SearchClient::from_settings(&settings_for(&server))
        .unwrap()
        .with_extractor(dorkscan::search::LinkExtractor::google());
    let links = client
        .search(r#"site:example.com "backup" ext:sql"#)
        .await
        .unwrap();

    assert_eq!(
        links,
        vec![
            "https://example.com/.env".to_string(),
            "https://example.com/about".to_string(),
            "https://example.com/backup.sql".to_string(),
        ]
    );
}

#[tokio::test]
async fn search_truncates_to_result_cap() {
    let server = MockServer::start().await;
    let body: String = (0..20)
        .map(|i| format!("<a href=\"https://example.com/file{:02}.sql\">x</a>\n", i))
        .collect();

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let settings = ScanSettings {
        max_results: 5,
        ..settings_for(&server)
    };
    let client = SearchClient::from_settings(&settings).unwrap();
    let links = client.search("site:example.com filetype:sql").await.unwrap();

    assert_eq!(links.len(), 5);
    assert_eq!(links[0], "https://example.com/file00.sql");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let client = SearchClient::from_settings(&settings_for(&server)).unwrap();
    let err = client.search("site:example.com filetype:env").await.unwrap_err();

    assert!(matches!(err, SearchError::Status(s) if s.as_u16() == 429));
    assert!(err.is_transient());
}

#[tokio::test]
async fn retries_transient_failures_when_enabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<a href=\"https://example.com/db.sql\">"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let settings = ScanSettings {
        retries: 2,
        ..settings_for(&server)
    };
    let client = SearchClient::from_settings(&settings).unwrap();
    let links = client.search("site:example.com filetype:sql").await.unwrap();

    assert_eq!(links, vec!["https://example.com/db.sql".to_string()]);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let settings = ScanSettings {
        retries: 3,
        ..settings_for(&server)
    };
    let client = SearchClient::from_settings(&settings).unwrap();

    assert!(client.search("site:example.com").await.is_err());
}

#[tokio::test]
async fn slow_engine_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let settings = ScanSettings {
        timeout_secs: 1,
        ..settings_for(&server)
    };
    let client = SearchClient::from_settings(&settings).unwrap();
    let err = client.search("site:example.com").await.unwrap_err();

    assert!(matches!(err, SearchError::Http(ref e) if e.is_timeout()));
}

#[test]
fn invalid_endpoint_is_rejected() {
    let settings = ScanSettings {
        search_url: "not a url".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        SearchClient::from_settings(&settings),
        Err(SearchError::Endpoint(_))
    ));
}
