//! REST client for the Denea product feed.
//!
//! Wraps the ERP's polled HTTP API using [`reqwest`] with a fixed
//! per-request timeout. Response bodies are decoded through
//! [`cromos_core::parsers::parse_api_items`], which tolerates the ERP's
//! envelope and naming variations.

use std::time::Duration;

use cromos_core::parsers::parse_api_items;
use cromos_core::{ParseError, ProductRecord};

use crate::config::DeneaConfig;

/// Errors from the Denea API layer.
#[derive(Debug, thiserror::Error)]
pub enum DeneaError {
    /// `DENEA_API_URL` / `DENEA_API_KEY` are not configured.
    #[error("Denea API credentials are not configured")]
    Unconfigured,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Denea returned a non-2xx status code.
    #[error("Denea API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response decoded as JSON but matched no known feed shape.
    #[error(transparent)]
    Decode(#[from] ParseError),
}

/// HTTP client for one Denea instance.
pub struct DeneaClient {
    client: reqwest::Client,
    config: DeneaConfig,
}

impl DeneaClient {
    /// Create a client with a pre-configured HTTP connection pool.
    pub fn new(config: DeneaConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// The webhook signing secret, when configured.
    pub fn webhook_secret(&self) -> Option<&str> {
        self.config.webhook_secret.as_deref()
    }

    /// Fetch the full product feed.
    ///
    /// Sends `GET {api_url}/products` with bearer auth and decodes the
    /// response through the shared envelope parser.
    pub async fn fetch_products(&self) -> Result<Vec<ProductRecord>, DeneaError> {
        let (api_url, api_key) = self.credentials()?;

        let response = self
            .client
            .get(format!("{api_url}/products"))
            .bearer_auth(api_key)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let payload: serde_json::Value = response.json().await?;
        let records = parse_api_items(&payload)?;

        tracing::info!(count = records.len(), "Fetched product feed from Denea");
        Ok(records)
    }

    // ---- private helpers ----

    fn credentials(&self) -> Result<(&str, &str), DeneaError> {
        match (&self.config.api_url, &self.config.api_key) {
            (Some(url), Some(key)) => Ok((url.trim_end_matches('/'), key)),
            _ => Err(DeneaError::Unconfigured),
        }
    }

    /// Ensure the response has a success status code, or capture the
    /// status and body text for the error.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, DeneaError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(DeneaError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
