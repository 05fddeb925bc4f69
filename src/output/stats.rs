//! Statistics for a finished crawl
//!
//! This module provides functionality for summarizing a sitemap and
//! displaying the summary.

use crate::state::Sitemap;
use std::collections::BTreeSet;
use std::time::Duration;
use url::Url;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Pages fetched and parsed
    pub pages: usize,

    /// Pages that could not be fetched or parsed
    pub unreachable: usize,

    /// Total number of links recorded, duplicates included
    pub total_links: usize,

    /// Total number of assets recorded, duplicates included
    pub total_assets: usize,

    /// Distinct hosts among mapped pages
    pub unique_hosts: usize,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Summarizes a sitemap
    pub fn from_sitemap(sitemap: &Sitemap, elapsed: Duration) -> Self {
        let mut hosts = BTreeSet::new();
        let mut total_links = 0;
        let mut total_assets = 0;

        for (url, entry) in sitemap.pages() {
            if let Some(host) = Url::parse(url).ok().and_then(|u| u.host_str().map(String::from)) {
                hosts.insert(host);
            }
            total_links += entry.links.len();
            total_assets += entry.assets.len();
        }

        Self {
            pages: sitemap.len(),
            unreachable: sitemap.unreachable_count(),
            total_links,
            total_assets,
            unique_hosts: hosts.len(),
            elapsed,
        }
    }

    /// Pages that a fetch was dispatched for
    pub fn fetched(&self) -> usize {
        self.pages + self.unreachable
    }
}

/// Prints statistics to stderr in a formatted manner
///
/// Standard output is reserved for the sitemap itself.
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    eprintln!("=== Crawl Statistics ===\n");

    eprintln!("Overview:");
    eprintln!("  Pages fetched: {}", stats.fetched());
    eprintln!("  Pages mapped: {}", stats.pages);
    eprintln!("  Unreachable: {}", stats.unreachable);
    eprintln!("  Hosts: {}", stats.unique_hosts);
    eprintln!("  Links recorded: {}", stats.total_links);
    eprintln!("  Assets recorded: {}", stats.total_assets);
    eprintln!("  Duration: {:.2}s", stats.elapsed.as_secs_f64());
    eprintln!();

    let success_rate = if stats.fetched() > 0 {
        (stats.pages as f64 / stats.fetched() as f64) * 100.0
    } else {
        0.0
    };

    eprintln!(
        "Success Rate: {:.1}% ({} / {} pages successfully mapped)",
        success_rate,
        stats.pages,
        stats.fetched()
    );
}
