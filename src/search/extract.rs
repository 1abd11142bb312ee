//! Link extraction from raw search result pages.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Scheme followed by anything that is not whitespace, a query separator, a
/// quote, an angle bracket, a backslash, or a code point in U+007F..=U+00FF.
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s&"'<>\\\x7f-\xff]+"#).expect("link pattern is valid")
});

/// Pulls absolute URLs out of a result page, dropping the engine's own links.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    engine_domain: String,
    cache_marker: String,
}

impl LinkExtractor {
    /// Extractor that ignores `engine_domain`, its subdomains, and any host
    /// containing `cache_marker`.
    pub fn new(engine_domain: impl Into<String>, cache_marker: impl Into<String>) -> Self {
        Self {
            engine_domain: engine_domain.into().to_lowercase(),
            cache_marker: cache_marker.into().to_lowercase(),
        }
    }

    /// Extractor for Google result pages.
    pub fn google() -> Self {
        Self::new("google.com", "webcache")
    }

    /// Extractor for whatever engine serves `endpoint`, treating a leading
    /// `www.` as part of the engine's root domain.
    pub fn for_endpoint(endpoint: &url::Url) -> Self {
        let host = endpoint.host_str().unwrap_or_default();
        Self::new(host.trim_start_matches("www."), "webcache")
    }

    /// Extract the set of non-engine links found in `body`.
    ///
    /// Never fails: truncated or malformed markup just yields fewer matches.
    pub fn extract(&self, body: &str) -> HashSet<String> {
        LINK_PATTERN
            .find_iter(body)
            .map(|m| decode(m.as_str()))
            .filter(|link| !self.is_engine_link(link))
            .collect()
    }

    /// Check whether a link points back at the search engine or its cache.
    ///
    /// Regional variants of the engine domain (`google.com.hk`, `google.co.uk`)
    /// and their subdomains count as the engine too.
    pub fn is_engine_link(&self, link: &str) -> bool {
        let host = url::Url::parse(link)
            .ok()
            .and_then(|u| u.host_str().map(str::to_lowercase));
        match host {
            Some(host) => {
                host == self.engine_domain
                    || host.ends_with(&format!(".{}", self.engine_domain))
                    || self.is_regional_engine_host(&host)
                    || host.contains(&self.cache_marker)
            }
            // Unparseable: fall back to a substring check.
            None => {
                let lower = link.to_lowercase();
                lower.contains(&self.engine_domain) || lower.contains(&self.cache_marker)
            }
        }
    }

    /// Engine label followed only by short alphabetic suffix labels, e.g.
    /// `www.google.com.hk` for engine domain `google.com`.
    fn is_regional_engine_host(&self, host: &str) -> bool {
        let Some(engine_label) = self.engine_label() else {
            return false;
        };
        let labels: Vec<&str> = host.split('.').collect();
        labels
            .iter()
            .rposition(|label| *label == engine_label)
            .map(|idx| &labels[idx + 1..])
            .is_some_and(|suffix| {
                !suffix.is_empty()
                    && suffix.iter().all(|label| {
                        (2..=3).contains(&label.len())
                            && label.chars().all(|c| c.is_ascii_alphabetic())
                    })
            })
    }

    /// Leading label of the engine domain, when it has a suffix to vary.
    fn engine_label(&self) -> Option<&str> {
        let (label, suffix) = self.engine_domain.split_once('.')?;
        if suffix.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }
        Some(label)
    }
}

fn decode(link: &str) -> String {
    urlencoding::decode(link)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| link.to_string())
}

/// Sort, deduplicate, and optionally truncate a list of links in place.
///
/// Pass `max_results: 0` to skip truncation.
pub fn dedup_and_limit(items: &mut Vec<String>, max_results: usize) {
    items.sort();
    items.dedup();
    if max_results > 0 && items.len() > max_results {
        items.truncate(max_results);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <a href="/url?q=https://example.com/backup.sql&amp;sa=U">x</a>
        <a href="https://www.google.com/preferences?hl=en">prefs</a>
        <a href="https://maps.google.com/maps?q=x">maps</a>
        <a href="https://webcache.googleusercontent.com/search?q=cache:abc">cached</a>
        <a href='https://example.com/files/report%20final.pdf'>doc</a>
        <a href="https://example.com/backup.sql">dup</a>
        </body></html>
    "#;

    #[test]
    fn extracts_and_filters_engine_links() {
        let links = LinkExtractor::google().extract(PAGE);

        assert!(links.contains("https://example.com/backup.sql"));
        assert!(links.contains("https://example.com/files/report final.pdf"));
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn never_returns_engine_hosts() {
        let extractor = LinkExtractor::google();
        for link in extractor.extract(PAGE) {
            let host = url::Url::parse(&link).unwrap().host_str().unwrap().to_string();
            assert!(host != "google.com" && !host.ends_with(".google.com"));
            assert!(!host.contains("webcache"));
        }
    }

    #[test]
    fn extraction_is_idempotent() {
        let extractor = LinkExtractor::google();
        assert_eq!(extractor.extract(PAGE), extractor.extract(PAGE));
    }

    #[test]
    fn malformed_html_yields_empty_set() {
        let extractor = LinkExtractor::google();
        assert!(extractor.extract("<html><a href=\"htt").is_empty());
        assert!(extractor.extract("").is_empty());
    }

    #[test]
    fn stops_at_query_separator() {
        let links = LinkExtractor::google().extract("https://example.com/a.env&b=c");
        assert!(links.contains("https://example.com/a.env"));
    }

    #[test]
    fn endpoint_host_becomes_engine_domain() {
        let endpoint = url::Url::parse("https://www.google.com/search").unwrap();
        let extractor = LinkExtractor::for_endpoint(&endpoint);
        assert!(extractor.is_engine_link("https://accounts.google.com/login"));
        assert!(!extractor.is_engine_link("https://example.com/login"));
    }

    #[test]
    fn regional_engine_hosts_are_dropped() {
        let extractor = LinkExtractor::google();
        let page = r#"
            <a href="https://www.google.com.hk/search?q=x">next</a>
            <a href="https://accounts.google.co.uk/ServiceLogin">sign in</a>
            <a href="https://google.de/intl/de/policies">policies</a>
            <a href="https://example.com/logs/app.log">hit</a>
        "#;

        let links = extractor.extract(page);
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://example.com/logs/app.log"));
    }

    #[test]
    fn regional_match_needs_engine_label() {
        let extractor = LinkExtractor::google();
        assert!(!extractor.is_engine_link("https://googleblog.example.com.hk/x"));
        assert!(!extractor.is_engine_link("https://google.example.org/x"));
        assert!(!extractor.is_engine_link("https://mygoogle.co.uk/x"));

        let local = LinkExtractor::new("127.0.0.1", "webcache");
        assert!(!local.is_engine_link("https://example.com/127/0/a.env"));
    }

    #[test]
    fn lookalike_hosts_are_kept() {
        let extractor = LinkExtractor::google();
        assert!(!extractor.is_engine_link("https://notgoogle.com/x"));
        assert!(extractor.is_engine_link("https://GOOGLE.com/x"));
    }

    #[test]
    fn dedup_and_limit_sorts_and_truncates() {
        let mut items = vec![
            "c".to_string(),
            "a".to_string(),
            "b".to_string(),
            "a".to_string(),
        ];
        dedup_and_limit(&mut items, 2);
        assert_eq!(items, vec!["a", "b"]);

        let mut items = vec!["b".to_string(), "a".to_string()];
        dedup_and_limit(&mut items, 0);
        assert_eq!(items, vec!["a", "b"]);
    }
}
