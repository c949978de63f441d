//! Fact API client
//!
//! Fetches a single fact from a configured third-party JSON endpoint. The
//! endpoint replies with a `data` list; the first element is the fact text.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when fetching a fact
#[derive(Debug, Error)]
pub enum FactError {
    /// HTTP request failed before a status was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Upstream replied with a non-success status
    #[error("Fact service returned status {0}")]
    Status(u16),

    /// Failed to parse the JSON response body
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Response body did not match the expected schema
    #[error("Malformed fact response: {0}")]
    Schema(String),
}

/// Client for fetching facts from the configured endpoint
#[derive(Debug, Clone)]
pub struct FactClient {
    client: Client,
}

impl Default for FactClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FactClient {
    /// Create a new FactClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new FactClient with a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch one fact from the given URL
    ///
    /// Issues a single GET request with no headers and relays the first
    /// element of the response's `data` list.
    pub async fn fetch_fact(&self, url: &str) -> Result<String, FactError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FactError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let body: FactResponse = serde_json::from_str(&text)?;

        first_fact(body)
    }
}

/// Extract the first fact from a parsed response body
fn first_fact(body: FactResponse) -> Result<String, FactError> {
    body.data
        .into_iter()
        .next()
        .ok_or_else(|| FactError::Schema("empty data list".to_string()))
}

/// Fact API response structure
#[derive(Debug, Deserialize)]
struct FactResponse {
    data: Vec<String>,
}
