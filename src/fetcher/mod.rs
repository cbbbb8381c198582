pub mod http_fetcher;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

/// Source of the raw headline document.
#[async_trait]
pub trait Fetcher {
    /// Perform one best-effort fetch of the configured feed.
    async fn fetch_headlines(&self) -> Result<Value>;
}
