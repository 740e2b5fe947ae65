use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::model::FormFields;

/// The original demo's stand-in endpoint; resolves nowhere by design.
pub const DEFAULT_ENDPOINT: &str = "https://nonexistent-api-endpoint-12345.com/submit";

/// Failures at the network boundary.
///
/// A malformed success body is a transport-class failure for reporting
/// purposes: the caller's reporting policy treats all three variants alike.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection failure, timeout, or other client-side error.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status code.
    #[error("HTTP error! status: {0}")]
    Status(StatusCode),

    /// The endpoint answered 2xx but the body was not parseable JSON.
    #[error("malformed response body: {0}")]
    MalformedBody(#[source] serde_json::Error),
}

/// The external acceptance endpoint the form submits to.
///
/// The seam between the submission controller and the network; tests
/// substitute stub implementations.
#[allow(async_fn_in_trait)]
pub trait AcceptanceEndpoint {
    /// Submits one form snapshot, returning the parsed response body.
    async fn submit(&self, fields: &FormFields) -> Result<Value, TransportError>;
}

/// HTTP implementation: a single JSON POST per submission.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: Client,
    url: String,
}

impl HttpEndpoint {
    /// Creates an endpoint with no request timeout.
    pub fn new(url: impl Into<String>) -> Result<Self, TransportError> {
        Ok(Self {
            client: Client::builder().build()?,
            url: url.into(),
        })
    }

    /// Creates an endpoint whose requests fail after `timeout`.
    ///
    /// Expiry surfaces as [`TransportError::Transport`], identical to any
    /// other connection failure.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url: url.into(),
        })
    }

    /// The configured endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AcceptanceEndpoint for HttpEndpoint {
    async fn submit(&self, fields: &FormFields) -> Result<Value, TransportError> {
        let response = self.client.post(&self.url).json(fields).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        // Read the body as text first so a parse failure is distinguishable
        // from a transport failure.
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(TransportError::MalformedBody)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_builds_client() {
        let endpoint = HttpEndpoint::new("https://example.com/submit").unwrap();
        assert_eq!(endpoint.url(), "https://example.com/submit");
    }

    #[test]
    fn with_timeout_builds_client() {
        let endpoint =
            HttpEndpoint::with_timeout(DEFAULT_ENDPOINT, Duration::from_secs(5)).unwrap();
        assert_eq!(endpoint.url(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn status_error_carries_code() {
        let err = TransportError::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "HTTP error! status: 500 Internal Server Error");
    }

    #[test]
    fn malformed_body_error_from_parse_failure() {
        let parse_err = serde_json::from_str::<Value>("not json").unwrap_err();
        let err = TransportError::MalformedBody(parse_err);
        assert!(err.to_string().starts_with("malformed response body:"));
    }
}
