//! Target domain validation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Alphanumeric/hyphen labels separated by dots, ending in a TLD of 2+ letters.
static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,}$").expect("domain pattern is valid")
});

/// Errors for user-supplied targets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Target cannot be empty!")]
    Empty,

    #[error("Invalid domain format!")]
    Malformed(String),
}

/// A syntactically valid target domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain(String);

impl Domain {
    /// Validate raw input. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let target = input.trim();
        if target.is_empty() {
            return Err(ValidationError::Empty);
        }
        if !DOMAIN_PATTERN.is_match(target) {
            return Err(ValidationError::Malformed(target.to_string()));
        }
        Ok(Self(target.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Domain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_domains() {
        assert_eq!(Domain::parse("example.com").unwrap().as_str(), "example.com");
        assert!(Domain::parse("vault.fbi.gov").is_ok());
        assert!(Domain::parse("my-site.co.uk").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(
            Domain::parse("  example.com \n").unwrap().as_str(),
            "example.com"
        );
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Domain::parse(""), Err(ValidationError::Empty));
        assert_eq!(Domain::parse("   "), Err(ValidationError::Empty));
    }

    #[test]
    fn rejects_malformed() {
        assert!(matches!(
            Domain::parse("not a domain"),
            Err(ValidationError::Malformed(_))
        ));
        assert!(matches!(
            Domain::parse("example"),
            Err(ValidationError::Malformed(_))
        ));
        assert!(matches!(
            Domain::parse("example.c0m"),
            Err(ValidationError::Malformed(_))
        ));
        assert!(matches!(
            Domain::parse("example..com"),
            Err(ValidationError::Malformed(_))
        ));
        assert!(matches!(
            Domain::parse("https://example.com"),
            Err(ValidationError::Malformed(_))
        ));
    }
}
