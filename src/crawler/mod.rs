//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` trait
//! - HTML parsing and reference extraction
//! - Page inspection and entry building
//! - Bounded dispatch of inspection tasks
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod inspector;
mod parser;
mod scheduler;

pub use coordinator::{crawl, Coordinator};
pub use fetcher::{build_http_client, FetchError, HttpFetcher, PageFetcher};
pub use inspector::{build_entry, inspect_page, inspect_page_with_timeout, ResolvedPage};
pub use parser::{parse_document, parse_html, RawReferences};
pub use scheduler::{Outcome, Scheduler};

use crate::config::Config;
use crate::state::Sitemap;
use crate::SitewalkError;
use std::sync::Arc;
use url::Url;

/// Crawls a site over HTTP
///
/// This is the main entry point used by the command line. It will:
/// 1. Build the HTTP client from the configuration
/// 2. Crawl from the seed until no page is pending
/// 3. Return the sitemap
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - The URL to start from
///
/// # Returns
///
/// * `Ok(Sitemap)` - Crawl completed; unreachable pages are listed in the sitemap
/// * `Err(SitewalkError)` - The HTTP client could not be built
pub async fn crawl_site(config: &Config, seed: &Url) -> Result<Sitemap, SitewalkError> {
    let fetcher = Arc::new(HttpFetcher::new(config)?);
    Ok(crawl(fetcher, &config.crawler, seed).await)
}
