//! Outbound HTTP client for the configured upstream.
//!
//! # Responsibilities
//! - Issue exactly one GET per invocation
//! - Treat 4xx/5xx upstream statuses as failures
//! - Buffer and decode the full body before returning
//! - Release the outbound connection before returning
//!
//! # Design Decisions
//! - No idle pooling: each call opens a fresh connection that is closed once
//!   the body has been read
//! - No timeout, no retry; the call ends when the OS-level connection ends
//! - Redirects are followed with reqwest's default policy
//! - Proxy environment variables are ignored
//! - Nothing from the inbound request reaches the upstream

use std::time::Instant;

use reqwest::{Client, Url};

use crate::upstream::body::join_lines;
use crate::upstream::types::UpstreamError;

/// Client bound to a single upstream URL.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    url: Url,
}

impl UpstreamClient {
    /// Build a client for `url`.
    pub fn new(url: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .no_proxy()
            .build()?;
        Ok(Self { client, url })
    }

    /// The upstream this client fetches.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch the upstream page and return its lines joined without separators.
    pub async fn fetch(&self) -> Result<String, UpstreamError> {
        let start = Instant::now();

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(UpstreamError::Connect)?;

        let status = response.status();
        let response = response.error_for_status().map_err(UpstreamError::Status)?;

        let raw = response.bytes().await.map_err(UpstreamError::Body)?;
        let content = join_lines(&raw);

        tracing::debug!(
            upstream = %self.url,
            status = %status,
            bytes = raw.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream fetched"
        );

        Ok(content)
    }

    /// Run [`fetch`](Self::fetch) on its own task.
    ///
    /// The outbound call keeps going even if the caller's future is dropped,
    /// e.g. because the inbound client disconnected.
    pub async fn fetch_detached(&self) -> Result<String, UpstreamError> {
        let client = self.clone();
        tokio::spawn(async move { client.fetch().await }).await?
    }
}
