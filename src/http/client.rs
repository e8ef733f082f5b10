//! HTTP transport for gateway exchanges
//!
//! One synchronous request/response pair at a time; the gateway protocol
//! has no pipelining and no retries.

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const CONTENT_TYPE_PLAIN: &str = "text/plain; charset=UTF-8";
const CONTENT_TYPE_XML: &str = "text/xml; charset=UTF-8";

/// HTTP transport errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Connection refused to {0}")]
    ConnectionRefused(String),
}

/// HTTP client for gateway exchanges
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout_secs: u64,
}

impl HttpClient {
    /// Create a client with the given request timeout
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    /// POST a plain-text request. Query parameters are URL-encoded by the
    /// client; an empty body is sent when `body` is `None`.
    pub async fn post_plain(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: Option<String>,
    ) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .post(url)
            .query(query)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE_PLAIN);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        self.execute(url, builder).await
    }

    /// POST a serialized XML document
    pub async fn post_xml(&self, url: &str, xml: String) -> Result<HttpResponse> {
        let builder = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE_XML)
            .body(xml);
        self.execute(url, builder).await
    }

    async fn execute(&self, url: &str, builder: reqwest::RequestBuilder) -> Result<HttpResponse> {
        debug!("Sending POST request to {}", url);

        let start = std::time::Instant::now();

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                anyhow::anyhow!(HttpError::Timeout(self.timeout_secs))
            } else if e.is_connect() {
                anyhow::anyhow!(HttpError::ConnectionRefused(url.to_string()))
            } else {
                anyhow::anyhow!(HttpError::RequestFailed(e.to_string()))
            }
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            reason,
            duration_ms
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            reason,
            body,
        })
    }
}

/// HTTP response
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status_code: u16,
    pub reason: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }
}
