//! Periodic headline refresh for the `watch` command.
//!
//! Keeps one controller alive, refreshes on a fixed interval or when the
//! user presses Enter, and re-renders every state the controller publishes.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};

use crate::cli::commands::render_state;
use crate::controller::FeedController;

/// Longest accepted refresh interval (30 days).
pub const MAX_INTERVAL_SECS: u64 = 30 * 86400;

/// Watch configuration
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Refresh interval in seconds
    pub interval_secs: u64,
    /// Maximum number of articles rendered per screen
    pub limit: Option<usize>,
}

impl WatchConfig {
    /// Parse interval string like "30s", "15m", "1h", "1d"
    pub fn parse_interval(s: &str) -> Result<u64, String> {
        let s = s.trim().to_lowercase();

        let (number, unit) = if let Some(hours) = s.strip_suffix('h') {
            (hours, 3600)
        } else if let Some(minutes) = s.strip_suffix('m') {
            (minutes, 60)
        } else if let Some(days) = s.strip_suffix('d') {
            (days, 86400)
        } else if let Some(secs) = s.strip_suffix('s') {
            (secs, 1)
        } else {
            (s.as_str(), 1)
        };

        let secs = number
            .parse::<u64>()
            .map_err(|_| format!("Invalid interval: {}. Use format like '30s', '15m', '1h'", s))?
            .checked_mul(unit)
            .filter(|secs| *secs <= MAX_INTERVAL_SECS)
            .ok_or_else(|| {
                format!(
                    "Interval too large: {} (maximum {})",
                    s,
                    Self::format_interval(MAX_INTERVAL_SECS)
                )
            })?;

        if secs == 0 {
            return Err("Interval must be greater than zero".to_string());
        }
        Ok(secs)
    }

    /// Format interval for display
    pub fn format_interval(secs: u64) -> String {
        if secs >= 86400 && secs.is_multiple_of(86400) {
            format!("{}d", secs / 86400)
        } else if secs >= 3600 && secs.is_multiple_of(3600) {
            format!("{}h", secs / 3600)
        } else if secs >= 60 && secs.is_multiple_of(60) {
            format!("{}m", secs / 60)
        } else {
            format!("{}s", secs)
        }
    }
}

pub struct Watcher {
    controller: Arc<FeedController>,
    config: WatchConfig,
}

impl Watcher {
    pub fn new(controller: Arc<FeedController>, config: WatchConfig) -> Self {
        Self { controller, config }
    }

    /// Run until Ctrl-C.
    pub async fn run(&self) -> crate::app::Result<()> {
        let mut states = self.controller.subscribe();
        let mut stdin = BufReader::new(tokio::io::stdin()).lines();
        let mut stdin_open = true;

        let mut timer = interval(Duration::from_secs(self.config.interval_secs));
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer.tick().await; // Skip the first immediate tick

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        println!(
            "Watching headlines (refresh every {}, Enter to refresh now, Ctrl-C to quit)",
            WatchConfig::format_interval(self.config.interval_secs)
        );

        // initialize() publishes Loading, which triggers the first render
        let _initial_load = self.controller.initialize();

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Watch interrupted, shutting down");
                    break;
                }
                changed = states.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = states.borrow_and_update().clone();
                    self.render(&state);
                }
                _ = timer.tick() => {
                    tracing::debug!("Scheduled refresh");
                    self.spawn_refresh();
                }
                line = stdin.next_line(), if stdin_open => {
                    match line {
                        Ok(Some(_)) => self.spawn_refresh(),
                        Ok(None) => stdin_open = false,
                        Err(e) => {
                            tracing::warn!("Stopped reading stdin: {}", e);
                            stdin_open = false;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    // Overlapping refreshes are fine: only the newest one publishes.
    fn spawn_refresh(&self) {
        let controller = self.controller.clone();
        tokio::spawn(async move {
            controller.refresh().await;
        });
    }

    fn render(&self, state: &crate::domain::FeedState) {
        tracing::debug!("Rendering {} state", state.label());
        println!("\n== {} ==", Local::now().format("%Y-%m-%d %H:%M:%S"));
        print!("{}", render_state(state, self.config.limit));
    }
}
