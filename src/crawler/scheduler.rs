//! Scheduler for dispatching page inspections
//!
//! This module handles:
//! - Spawning one inspection task per URL
//! - Global concurrency limiting via a semaphore
//! - Per-fetch timeouts
//! - Funneling every task's outcome into the single results channel

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::inspector::inspect_page_with_timeout;
use crate::crawler::parser::RawReferences;
use crate::InspectError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};
use url::Url;

/// Result of inspecting one URL, as sent back by its task
#[derive(Debug)]
pub struct Outcome {
    /// The URL that was inspected
    pub url: Url,

    /// Raw references on success, or why the page is unreachable
    pub result: Result<RawReferences, InspectError>,
}

/// Scheduler spawns inspection tasks and bounds how many fetch at once
///
/// Every dispatched task sends exactly one `Outcome` on the results channel.
/// Tasks never touch crawl state themselves.
pub struct Scheduler {
    /// Page fetcher shared by all tasks
    fetcher: Arc<dyn PageFetcher>,

    /// Global semaphore for limiting concurrent fetches
    global_semaphore: Arc<Semaphore>,

    /// Time allowed for a single inspection
    fetch_timeout: Duration,

    /// Sending half of the results channel
    results: mpsc::UnboundedSender<Outcome>,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The page fetcher used by every task
    /// * `config` - The crawler configuration (concurrency and timeout)
    /// * `results` - Channel receiving every task's outcome
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        config: &CrawlerConfig,
        results: mpsc::UnboundedSender<Outcome>,
    ) -> Self {
        let permits = (config.max_concurrent_fetches as usize).max(1);

        Self {
            fetcher,
            global_semaphore: Arc::new(Semaphore::new(permits)),
            fetch_timeout: config.fetch_timeout(),
            results,
        }
    }

    /// Spawns an inspection task for `url`
    ///
    /// The task waits for a semaphore permit, inspects the page under the
    /// fetch timeout, and reports the outcome.
    pub fn dispatch(&self, url: Url) {
        let fetcher = Arc::clone(&self.fetcher);
        let semaphore = Arc::clone(&self.global_semaphore);
        let results = self.results.clone();
        let fetch_timeout = self.fetch_timeout;

        tracing::trace!("Dispatching {}", url);

        tokio::spawn(async move {
            let result = match semaphore.acquire_owned().await {
                Ok(_permit) => inspect_page_with_timeout(&*fetcher, &url, fetch_timeout).await,
                Err(e) => Err(InspectError::Fetch {
                    url: url.to_string(),
                    message: format!("scheduler closed: {}", e),
                }),
            };

            if results.send(Outcome { url, result }).is_err() {
                tracing::debug!("Results channel closed before an outcome was delivered");
            }
        });
    }

    /// Number of fetch permits currently free
    pub fn available_permits(&self) -> usize {
        self.global_semaphore.available_permits()
    }
}
