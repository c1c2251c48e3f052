//! reqwest adapter for the chat and record endpoints.
//!
//! - `POST {chat_url}/mcp_client/chat` with `{"prompt": ...}`; the reply body
//!   is consumed as a chunked byte stream
//! - `GET {api_url}/mcp_api/load_humans` returning a JSON array of records

use async_trait::async_trait;
use finder_application::{ByteStream, ChatTransport, RecordSource, StreamError, TransportError};
use finder_domain::Human;
use finder_domain::core::string::truncate;
use futures::StreamExt;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Path of the streaming chat endpoint, relative to the chat base URL.
pub const CHAT_PATH: &str = "/mcp_client/chat";

/// Path of the record listing endpoint, relative to the API base URL.
pub const RECORDS_PATH: &str = "/mcp_api/load_humans";

/// Maximum error body kept in [`TransportError::Status`]
const MAX_ERROR_BODY: usize = 512;

#[derive(Serialize)]
struct ChatRequest<'a> {
    prompt: &'a str,
}

/// HTTP backend implementing [`ChatTransport`] and [`RecordSource`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    chat_url: String,
    api_url: String,
}

impl HttpBackend {
    /// Create a backend with default client settings.
    pub fn new(chat_url: &str, api_url: &str) -> Result<Self, TransportError> {
        Self::build(chat_url, api_url, reqwest::Client::builder())
    }

    /// Create a backend whose connections must be established within
    /// `connect_timeout`. The reply stream itself has no deadline.
    pub fn with_connect_timeout(
        chat_url: &str,
        api_url: &str,
        connect_timeout: Duration,
    ) -> Result<Self, TransportError> {
        Self::build(
            chat_url,
            api_url,
            reqwest::Client::builder().connect_timeout(connect_timeout),
        )
    }

    fn build(
        chat_url: &str,
        api_url: &str,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, TransportError> {
        let client = builder
            .user_agent(concat!("human-finder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            chat_url: normalize_base(chat_url)?,
            api_url: normalize_base(api_url)?,
        })
    }

    pub fn chat_endpoint(&self) -> String {
        format!("{}{}", self.chat_url, CHAT_PATH)
    }

    pub fn records_endpoint(&self) -> String {
        format!("{}{}", self.api_url, RECORDS_PATH)
    }
}

#[async_trait]
impl ChatTransport for HttpBackend {
    async fn open_chat(&self, prompt: &str) -> Result<ByteStream, TransportError> {
        let url = self.chat_endpoint();
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { prompt })
            .send()
            .await
            .map_err(request_error)?;
        let response = ensure_success(response).await?;

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| StreamError::Interrupted(e.to_string())));
        Ok(Box::pin(stream))
    }
}

#[async_trait]
impl RecordSource for HttpBackend {
    async fn load_humans(&self) -> Result<Vec<Human>, TransportError> {
        let url = self.records_endpoint();
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(request_error)?;
        let response = ensure_success(response).await?;

        response
            .json::<Vec<Human>>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Validate a base URL and strip trailing slashes.
fn normalize_base(raw: &str) -> Result<String, TransportError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TransportError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            raw,
            url.scheme()
        )));
    }
    Ok(trimmed.to_string())
}

fn request_error(e: reqwest::Error) -> TransportError {
    if e.is_builder() {
        TransportError::InvalidUrl(e.to_string())
    } else {
        TransportError::Connection(e.to_string())
    }
}

/// Turn a non-success status into [`TransportError::Status`], keeping a
/// truncated copy of the body for diagnostics.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransportError::Status {
        status: status.as_u16(),
        body: truncate(body.trim(), MAX_ERROR_BODY),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_join_without_double_slash() {
        let backend = HttpBackend::new("http://localhost:8081/", "http://localhost:8080").unwrap();
        assert_eq!(backend.chat_endpoint(), "http://localhost:8081/mcp_client/chat");
        assert_eq!(
            backend.records_endpoint(),
            "http://localhost:8080/mcp_api/load_humans"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = HttpBackend::new("not a url", "http://localhost:8080").unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
    }

    #[test]
    fn test_non_http_scheme_is_rejected() {
        let err = HttpBackend::new("http://localhost:8081", "ftp://files").unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
    }

    #[test]
    fn test_chat_request_body_shape() {
        let body = serde_json::to_value(ChatRequest { prompt: "hello" }).unwrap();
        assert_eq!(body, serde_json::json!({ "prompt": "hello" }));
    }
}
