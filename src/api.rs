//! HTTP client for the EPG feed.
//!
//! One async client, one endpoint. The whole guide arrives in a single GET;
//! there is no pagination, retry, or refresh. The fetch runs in its own
//! Tokio task and reports back over a channel.

use anyhow::{Context, Result};
use reqwest::Client;

use crate::config::Config;
use crate::normalize::NormalizedGuide;

/// Header carrying the feed's static API key, when one is configured.
const API_KEY_HEADER: &str = "x-api-key";

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Client for the guide endpoint
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    guide_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            guide_url: config.guide_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetch the raw guide payload.
    ///
    /// Errors here are fatal for the load: network failure, a non-2xx
    /// status, or a body that is not JSON. Shape problems inside the JSON
    /// are the normalizer's business.
    pub async fn fetch_guide(&self) -> Result<serde_json::Value> {
        let mut request = self.client.get(&self.guide_url);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .context("Failed to send request to guide endpoint")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "API error: {} - {}",
                response.status(),
                response.text().await.unwrap_or_default()
            );
        }

        response
            .json()
            .await
            .context("Failed to parse guide response as JSON")
    }
}

/// Messages sent from the fetch task to the main TUI thread
#[derive(Debug, Clone)]
pub enum GuideMessage {
    /// The guide was fetched and normalized successfully
    Loaded(NormalizedGuide),
    /// The load failed; the message carries the full error chain
    Failed(String),
}
