//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator owns all crawl state. Inspection tasks run concurrently,
//! but their outcomes are consumed one at a time from a single channel, and
//! only this consumption loop marks URLs, records entries, and counts pending
//! fetches. No lock guards the visit map because nothing else can reach it.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::inspector::ResolvedPage;
use crate::crawler::scheduler::{Outcome, Scheduler};
use crate::output::CrawlStatistics;
use crate::state::{Sitemap, VisitState};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    fetcher: Arc<dyn PageFetcher>,
    config: CrawlerConfig,
}

/// Mutable state of one crawl
struct CrawlRun {
    /// Every URL seen so far; absent means unseen
    visits: HashMap<String, VisitState>,

    /// Fetches dispatched whose outcome has not been consumed
    pending: usize,

    scheduler: Scheduler,
}

impl CrawlRun {
    /// Marks `url` in flight and dispatches it, unless it was already seen
    ///
    /// The marker is written before the task is spawned, so a URL discovered
    /// twice is only ever dispatched once.
    fn visit(&mut self, url: Url) -> bool {
        if self.visits.contains_key(url.as_str()) {
            return false;
        }

        self.visits.insert(url.to_string(), VisitState::InFlight);
        self.pending += 1;
        self.scheduler.dispatch(url);
        true
    }

    /// Applies one outcome to the crawl state
    ///
    /// Each dispatch yields exactly one outcome; an outcome for a URL that
    /// already has a result is dropped without touching the pending count.
    fn record(&mut self, outcome: Outcome) {
        let Outcome { url, result } = outcome;

        if let Some(state) = self.visits.get(url.as_str()) {
            if state.is_terminal() {
                tracing::warn!("Dropping repeated outcome for {}, already {}", url, state);
                return;
            }
        }

        self.pending -= 1;

        let state = match result {
            Ok(refs) => {
                let page = ResolvedPage::resolve(&url, refs);

                let mut discovered = 0;
                for link in &page.links {
                    if self.visit(link.clone()) {
                        discovered += 1;
                    }
                }

                tracing::debug!(
                    "Resolved {}: {} links ({} new), {} assets",
                    url,
                    page.links.len(),
                    discovered,
                    page.assets.len()
                );

                VisitState::Resolved(page.into_entry())
            }
            Err(e) => {
                tracing::warn!("{}. Skipping...", e);
                VisitState::Unreachable(e.to_string())
            }
        };

        self.visits.insert(url.to_string(), state);
    }
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The page fetcher used by every inspection
    /// * `config` - The crawler configuration
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: CrawlerConfig) -> Self {
        Self { fetcher, config }
    }

    /// Runs a crawl from `seed` until no fetch is pending
    ///
    /// 1. Marks the seed in flight and dispatches it (one pending fetch)
    /// 2. Consumes outcomes one at a time:
    ///    a. Decrements the pending count
    ///    b. On success, resolves the page's references, dispatches every
    ///       link not seen before, and records the entry
    ///    c. On failure, records the URL as unreachable
    /// 3. Stops as soon as the pending count reaches zero
    /// 4. Builds the sitemap from the visit map
    ///
    /// Individual page failures never abort the crawl.
    pub async fn crawl(&self, seed: &Url) -> Sitemap {
        let mut seed = seed.clone();
        seed.set_fragment(None);

        tracing::info!("Starting crawl at {}", seed);
        let start_time = Instant::now();

        let (results_tx, mut results_rx) = mpsc::unbounded_channel();
        let mut run = CrawlRun {
            visits: HashMap::new(),
            pending: 0,
            scheduler: Scheduler::new(Arc::clone(&self.fetcher), &self.config, results_tx),
        };

        run.visit(seed);

        let mut pages_consumed: usize = 0;
        while run.pending > 0 {
            let outcome = match results_rx.recv().await {
                Some(outcome) => outcome,
                None => {
                    tracing::error!(
                        "Results channel closed with {} fetches pending",
                        run.pending
                    );
                    break;
                }
            };

            run.record(outcome);
            pages_consumed += 1;

            if pages_consumed % 50 == 0 {
                tracing::info!(
                    "Progress: {} pages inspected, {} pending, {} fetch slots free",
                    pages_consumed,
                    run.pending,
                    run.scheduler.available_permits()
                );
            }
        }

        let sitemap: Sitemap = run.visits.into_iter().collect();

        let stats = CrawlStatistics::from_sitemap(&sitemap, start_time.elapsed());
        tracing::info!(
            "Crawl completed: {} pages mapped, {} unreachable in {:?}",
            stats.pages,
            stats.unreachable,
            stats.elapsed
        );

        sitemap
    }
}

/// Runs a crawl with the given fetcher
///
/// # Example
///
/// ```no_run
/// use sitewalk::config::Config;
/// use sitewalk::crawler::{crawl, HttpFetcher};
/// use std::sync::Arc;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let fetcher = Arc::new(HttpFetcher::new(&config)?);
/// let seed = Url::parse("https://example.com/")?;
/// let sitemap = crawl(fetcher, &config.crawler, &seed).await;
/// println!("{} pages", sitemap.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(fetcher: Arc<dyn PageFetcher>, config: &CrawlerConfig, seed: &Url) -> Sitemap {
    Coordinator::new(fetcher, config.clone()).crawl(seed).await
}
