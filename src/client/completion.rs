//! HTTP client for the completion server.

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use std::time::Duration;

use crate::config::Config;
use crate::protocol::{CompletionRequest, CompletionResponse};

/// Sends one prompt per turn to the completion endpoint.
pub struct CompletionClient {
    url: String,
    client: Client,
}

impl CompletionClient {
    /// Create a client for the server described by `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            url: config.completion_url(),
            client,
        })
    }

    /// Get the endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send `request` and return the trimmed reply text.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to reach completion server at {}", self.url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Completion request failed with status {}: {}",
                status,
                body
            ));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .context("Failed to parse completion response")?;

        let reply = completion
            .reply()
            .ok_or_else(|| anyhow!("no response from the completion service"))?;
        Ok(reply.to_string())
    }
}
