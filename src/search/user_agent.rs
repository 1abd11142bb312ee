//! User agent handling for search requests.

/// Fixed browser-like user agent sent by default.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Real browser user agents for impersonate mode.
pub const IMPERSONATE_USER_AGENTS: &[&str] = &[
    // Chrome on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    // Chrome on Mac
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    // Firefox on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    // Firefox on Linux
    "Mozilla/5.0 (X11; Linux x86_64; rv:133.0) Gecko/20100101 Firefox/133.0",
    // Safari on Mac
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.1 Safari/605.1.15",
    // Edge on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36 Edg/131.0.0.0",
];

/// Resolve the user agent for a settings value.
///
/// `None` gives [`USER_AGENT`]. `"impersonate"` picks one of
/// [`IMPERSONATE_USER_AGENTS`] by process id, so one scan keeps a single
/// browser identity across all of its queries. Anything else is sent as is.
pub fn resolve_user_agent(setting: Option<&str>) -> String {
    match setting {
        None => USER_AGENT.to_string(),
        Some("impersonate") => {
            let idx = std::process::id() as usize % IMPERSONATE_USER_AGENTS.len();
            IMPERSONATE_USER_AGENTS[idx].to_string()
        }
        Some(custom) => custom.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_fixed() {
        assert_eq!(resolve_user_agent(None), USER_AGENT);
    }

    #[test]
    fn impersonate_picks_known_browser() {
        let ua = resolve_user_agent(Some("impersonate"));
        assert!(IMPERSONATE_USER_AGENTS.contains(&ua.as_str()));
    }

    #[test]
    fn impersonate_is_stable_within_a_run() {
        assert_eq!(
            resolve_user_agent(Some("impersonate")),
            resolve_user_agent(Some("impersonate"))
        );
    }

    #[test]
    fn custom_passes_through() {
        assert_eq!(resolve_user_agent(Some("MyBot/1.0")), "MyBot/1.0");
    }
}
