//! # pulsefeed
//!
//! A health-news headline client: one JSON feed in, a filtered list of
//! articles out, with observable loading/data/error states.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → ArticleDecoder → FeedController → presentation (CLI)
//! ```
//!
//! - [`fetcher`]: HTTP GET of the configured endpoint, status check, JSON body
//! - [`normalizer`]: Defensive decoding of feed records into [`domain::Article`]
//! - [`controller`]: Owns [`domain::FeedState`], sequences load and refresh
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the current headlines
//! pulsefeed headlines
//!
//! # Open the third article in the browser
//! pulsefeed open 3
//!
//! # Keep the list on screen, refreshing every 15 minutes
//! pulsefeed watch --interval 15m
//! ```

/// Application context and error types.
///
/// [`AppContext`](app::AppContext) wires config, fetcher, decoder and
/// controller together.
pub mod app;

/// Command-line interface using clap.
///
/// - `headlines [--limit N] [--json]` - Fetch once and print
/// - `open <n>` - Open the n-th article in the browser
/// - `watch [--interval 30m]` - Refresh periodically
pub mod cli;

/// Configuration loaded from `~/.config/pulsefeed/config.toml`.
pub mod config;

/// Feed state ownership with stale-response protection.
pub mod controller;

/// Core domain models.
///
/// - [`Article`](domain::Article): One normalized headline
/// - [`FeedState`](domain::FeedState): Loading, data or error
pub mod domain;

/// HTTP fetching of the headline document.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed sources
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Feed record decoding and filtering.
pub mod normalizer;

/// Periodic refresh loop behind `pulsefeed watch`.
pub mod watch;
