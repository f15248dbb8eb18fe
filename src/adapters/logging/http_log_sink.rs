//! HTTP Log Sink Adapter
//!
//! Sends the finished-diagnostic payload as JSON to the log endpoint and
//! reads back the entry id.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

use crate::config::LoggingConfig;
use crate::domain::diagnostic::DiagnosticLogPayload;
use crate::ports::{DiagnosticLogSink, LogReceipt, LogSinkError};

/// Configuration for the HTTP sink.
#[derive(Debug, Clone)]
pub struct HttpLogSinkConfig {
    /// Absolute URL of the log endpoint.
    pub endpoint_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpLogSinkConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&LoggingConfig> for HttpLogSinkConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self::new(config.endpoint_url()).with_timeout(config.timeout())
    }
}

#[derive(Debug, Deserialize)]
struct SuccessBody {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// reqwest-backed sink.
#[derive(Debug, Clone)]
pub struct HttpLogSink {
    config: HttpLogSinkConfig,
    client: Client,
}

impl HttpLogSink {
    /// Creates a sink with its own client.
    ///
    /// # Errors
    /// `Network` if the HTTP client cannot be built
    pub fn new(config: HttpLogSinkConfig) -> Result<Self, LogSinkError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LogSinkError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpLogSinkConfig {
        &self.config
    }

    /// Maps a non-2xx response to `Rejected`, preferring the endpoint's
    /// `{error}` message over the raw body.
    async fn handle_response_status(response: Response) -> Result<Response, LogSinkError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|parsed| parsed.error)
            .unwrap_or(body);

        Err(LogSinkError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl DiagnosticLogSink for HttpLogSink {
    async fn send(&self, payload: &DiagnosticLogPayload) -> Result<LogReceipt, LogSinkError> {
        let response = self
            .client
            .post(&self.config.endpoint_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LogSinkError::Network(format!(
                        "Timed out after {} ms",
                        self.config.timeout.as_millis()
                    ))
                } else if e.is_connect() {
                    LogSinkError::Network(format!("Connection failed: {}", e))
                } else {
                    LogSinkError::Network(e.to_string())
                }
            })?;

        let response = Self::handle_response_status(response).await?;

        let body: SuccessBody = response
            .json()
            .await
            .map_err(|e| LogSinkError::MalformedResponse(e.to_string()))?;

        body.id
            .map(|id| LogReceipt { id })
            .ok_or_else(|| LogSinkError::MalformedResponse("response has no id".to_string()))
    }
}
