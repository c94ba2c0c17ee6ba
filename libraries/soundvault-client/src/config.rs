//! Client configuration.

use crate::error::{ClientError, Result};

/// API base used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Configuration for connecting to a SoundVault API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address every request path is appended to
    /// (e.g. "https://sounds.example.com/api")
    pub api_base_url: String,
    /// Overrides the default `User-Agent` header
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            user_agent: None,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Trimmed base URL without trailing slashes.
    ///
    /// The scheme is passed through untouched.
    pub fn normalized_base_url(&self) -> Result<String> {
        let url = self.api_base_url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }
        Ok(url.to_string())
    }

    pub(crate) fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("SoundVault/{}", env!("CARGO_PKG_VERSION")))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_removed() {
        let config = ClientConfig::new("https://sounds.example.com/api///");
        assert_eq!(
            config.normalized_base_url().unwrap(),
            "https://sounds.example.com/api"
        );
    }

    #[test]
    fn test_whitespace_trimmed() {
        let config = ClientConfig::new("  http://localhost:8000/api/ \n");
        assert_eq!(
            config.normalized_base_url().unwrap(),
            "http://localhost:8000/api"
        );
    }

    #[test]
    fn test_scheme_passed_through() {
        // No protocol rewriting in either direction
        let plain = ClientConfig::new("http://sounds.example.com/api");
        assert_eq!(
            plain.normalized_base_url().unwrap(),
            "http://sounds.example.com/api"
        );
        let relative = ClientConfig::new("/api/");
        assert_eq!(relative.normalized_base_url().unwrap(), "/api");
    }

    #[test]
    fn test_empty_rejected() {
        for url in ["", "   ", "///"] {
            match ClientConfig::new(url).normalized_base_url() {
                Err(ClientError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
                other => panic!("Expected InvalidUrl for {:?}, got {:?}", url, other),
            }
        }
    }

    #[test]
    fn test_default_user_agent() {
        assert!(ClientConfig::default().user_agent().starts_with("SoundVault/"));
        let custom = ClientConfig::default().with_user_agent("tests/1.0");
        assert_eq!(custom.user_agent(), "tests/1.0");
    }
}
