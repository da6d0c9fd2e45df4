//! HTTP transport for the reasoning service, built on reqwest.
//!
//! # Configuration
//!
//! ```ignore
//! let transport = HttpReasoningTransport::new(Duration::from_secs(60))?;
//! let response = transport.post(endpoint, &variant, &request).await?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::ports::{
    HeaderVariant, ReasoningRequest, ReasoningTransport, TransportError, TransportResponse,
};

/// reqwest-backed [`ReasoningTransport`] with a per-call timeout.
#[derive(Debug, Clone)]
pub struct HttpReasoningTransport {
    client: Client,
    timeout: Duration,
}

impl HttpReasoningTransport {
    /// Creates a transport whose every call is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::InvalidRequest(format!("HTTP client: {}", e)))?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else if err.is_connect() {
            TransportError::Network(format!("Connection failed: {}", err))
        } else if err.is_builder() {
            TransportError::InvalidRequest(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl ReasoningTransport for HttpReasoningTransport {
    async fn post(
        &self,
        endpoint: &str,
        headers: &HeaderVariant,
        request: &ReasoningRequest,
    ) -> Result<TransportResponse, TransportError> {
        let mut builder = self.client.post(endpoint);
        for (name, value) in headers.iter() {
            builder = builder.header(name, value);
        }

        let response = builder
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_timeout() {
        let transport = HttpReasoningTransport::new(Duration::from_secs(60)).unwrap();
        assert_eq!(transport.timeout(), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let transport = HttpReasoningTransport::new(Duration::from_secs(2)).unwrap();
        let variant = HeaderVariant::plan(None, None).remove(0);
        let request = ReasoningRequest::new("prompt", 1, "talos-rest-endpoint");

        let result = transport
            .post("http://127.0.0.1:9/reasoning_api", &variant, &request)
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn malformed_url_is_a_transport_error() {
        let transport = HttpReasoningTransport::new(Duration::from_secs(2)).unwrap();
        let variant = HeaderVariant::plan(None, None).remove(0);
        let request = ReasoningRequest::new("prompt", 1, "talos-rest-endpoint");

        let result = transport.post("not a url", &variant, &request).await;

        assert!(result.is_err());
    }
}
