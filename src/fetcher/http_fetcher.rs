use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::app::{FeedError, Result, TransportError};
use crate::config::FeedConfig;
use crate::fetcher::Fetcher;

pub struct HttpFetcher {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        let timeout = config.timeout();

        let mut builder = Client::builder()
            .connect_timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.clone());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| FeedError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    async fn get_body(&self) -> Result<Vec<u8>> {
        let response = self.client.get(self.endpoint.clone()).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FeedError::Fetch(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_headlines(&self) -> Result<Value> {
        tracing::debug!("Fetching headlines from {}", self.endpoint);

        let body = tokio::time::timeout(self.timeout, self.get_body())
            .await
            .map_err(|_| TransportError::Timeout(self.timeout))??;

        tracing::debug!("Received {} bytes from {}", body.len(), self.endpoint);

        serde_json::from_slice(&body)
            .map_err(|e| FeedError::MalformedFeed(format!("body is not valid JSON: {}", e)))
    }
}
