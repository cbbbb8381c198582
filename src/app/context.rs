use std::path::Path;
use std::sync::Arc;

use crate::app::error::{FeedError, Result};
use crate::config::Config;
use crate::controller::FeedController;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::normalizer::ArticleDecoder;

/// Explicitly wired pipeline: no process-wide state, one context per session.
pub struct AppContext {
    pub config: Config,
    pub controller: Arc<FeedController>,
}

impl AppContext {
    /// Build from the config file at `config_path`, or the default location.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
        .map_err(|e| FeedError::Config(e.to_string()))?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.feed)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Wire the pipeline around a caller-supplied fetcher.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let decoder = ArticleDecoder::with_policy(config.decoder.on_bad_record);
        let controller = Arc::new(FeedController::new(fetcher, decoder));

        Self { config, controller }
    }
}
