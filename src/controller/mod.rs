use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::app::Result;
use crate::domain::{Article, FeedState};
use crate::fetcher::Fetcher;
use crate::normalizer::ArticleDecoder;

/// Whether a finished attempt got to publish its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Published,
    /// A newer attempt was issued while this one was in flight.
    Superseded,
}

/// Owns the feed state and sequences fetch + decode attempts.
///
/// Every attempt is tagged with a generation. Only the most recently
/// issued generation may publish, so a slow response can never replace
/// the result of a newer refresh.
pub struct FeedController {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    decoder: ArticleDecoder,
    state: watch::Sender<FeedState>,
    generation: AtomicU64,
}

impl FeedController {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, decoder: ArticleDecoder) -> Self {
        let (state, _) = watch::channel(FeedState::Loading);
        Self {
            fetcher,
            decoder,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state.subscribe()
    }

    /// Snapshot of the currently published state.
    pub fn state(&self) -> FeedState {
        self.state.borrow().clone()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Publish `Loading` and start the first load in the background.
    pub fn initialize(self: &Arc<Self>) -> JoinHandle<LoadOutcome> {
        let generation = self.issue_generation(true);
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.run(generation).await })
    }

    /// Fetch and decode once, publishing `Data` or `Error`.
    pub async fn load(&self) -> LoadOutcome {
        let generation = self.issue_generation(false);
        self.run(generation).await
    }

    /// Publish `Loading` right away, then load again.
    pub async fn refresh(&self) -> LoadOutcome {
        let generation = self.issue_generation(true);
        self.run(generation).await
    }

    // Issuing happens under the channel lock so it orders with publish().
    fn issue_generation(&self, reset: bool) -> u64 {
        let mut generation = 0;
        self.state.send_if_modified(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            if reset {
                *state = FeedState::Loading;
            }
            reset
        });
        generation
    }

    async fn run(&self, generation: u64) -> LoadOutcome {
        tracing::debug!("Starting headline load #{}", generation);

        let next = match self.fetch_articles().await {
            Ok(articles) => {
                tracing::info!("Load #{} produced {} articles", generation, articles.len());
                FeedState::Data(articles)
            }
            Err(e) => {
                tracing::error!("Load #{} failed: {}", generation, e);
                FeedState::Error(e.to_string())
            }
        };

        let outcome = self.publish(generation, next);
        if outcome == LoadOutcome::Superseded {
            tracing::warn!(
                "Discarding result of load #{}, superseded by #{}",
                generation,
                self.current_generation()
            );
        }
        outcome
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        let document = self.fetcher.fetch_headlines().await?;
        self.decoder.decode(&document)
    }

    fn publish(&self, generation: u64, next: FeedState) -> LoadOutcome {
        let mut outcome = LoadOutcome::Superseded;
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = next;
            outcome = LoadOutcome::Published;
            true
        });
        outcome
    }
}
