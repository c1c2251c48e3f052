//! Endpoint configuration from TOML (`[endpoints]` section)

use super::{ConfigIssue, Severity};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default base URL of the chat service.
pub const DEFAULT_CHAT_URL: &str = "http://localhost:8081";

/// Default base URL of the record API.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Raw endpoint configuration from TOML
///
/// # Example
///
/// ```toml
/// [endpoints]
/// chat_url = "http://localhost:8081"
/// api_url = "http://localhost:8080"
/// connect_timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEndpointsConfig {
    /// Base URL serving `/mcp_client/chat`
    pub chat_url: String,
    /// Base URL serving `/mcp_api/load_humans`
    pub api_url: String,
    /// Connection setup timeout in seconds (0 disables it)
    pub connect_timeout_secs: u64,
}

impl Default for FileEndpointsConfig {
    fn default() -> Self {
        Self {
            chat_url: DEFAULT_CHAT_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl FileEndpointsConfig {
    /// Connection setup deadline; `None` when `connect_timeout_secs` is 0.
    pub fn connect_timeout(&self) -> Option<Duration> {
        (self.connect_timeout_secs > 0).then(|| Duration::from_secs(self.connect_timeout_secs))
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (field, value) in [
            ("endpoints.chat_url", &self.chat_url),
            ("endpoints.api_url", &self.api_url),
        ] {
            match reqwest::Url::parse(value.trim()) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => issues.push(ConfigIssue::new(
                    Severity::Error,
                    field,
                    format!("{}: unsupported scheme '{}'", field, url.scheme()),
                )),
                Err(e) => issues.push(ConfigIssue::new(
                    Severity::Error,
                    field,
                    format!("{}: invalid URL '{}' ({})", field, value, e),
                )),
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(FileEndpointsConfig::default().validate().is_empty());
    }

    #[test]
    fn test_bad_url_is_an_error() {
        let config = FileEndpointsConfig {
            chat_url: "localhost".to_string(),
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].field, "endpoints.chat_url");
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let config = FileEndpointsConfig {
            connect_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.connect_timeout(), None);
        assert_eq!(
            FileEndpointsConfig::default().connect_timeout(),
            Some(Duration::from_secs(10))
        );
    }
}
