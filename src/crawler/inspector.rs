//! Page inspection
//!
//! Inspecting a page fetches it, parses it, and returns the raw references it
//! holds. Turning those references into a sitemap entry (normalization and
//! scope filtering) is a separate, pure step.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::{parse_document, RawReferences};
use crate::state::SitemapEntry;
use crate::url::{resolve_references, ReferenceKind};
use crate::InspectError;
use std::time::Duration;
use url::Url;

/// Fetches and parses a page
///
/// # Returns
///
/// * `Ok(RawReferences)` - Links and assets as written in the document
/// * `Err(InspectError::Fetch)` - The transport failed
/// * `Err(InspectError::Parse)` - The body is not a readable document
pub async fn inspect_page(
    fetcher: &dyn PageFetcher,
    url: &Url,
) -> Result<RawReferences, InspectError> {
    tracing::debug!("Fetching {}", url);

    let body = fetcher.get(url).await.map_err(|e| InspectError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    parse_document(&body).map_err(|message| InspectError::Parse {
        url: url.to_string(),
        message,
    })
}

/// Inspects a page, giving up after `after`
///
/// A fetch that never completes would otherwise keep the crawl from
/// terminating; here it becomes an `InspectError::Timeout`.
pub async fn inspect_page_with_timeout(
    fetcher: &dyn PageFetcher,
    url: &Url,
    after: Duration,
) -> Result<RawReferences, InspectError> {
    match tokio::time::timeout(after, inspect_page(fetcher, url)).await {
        Ok(result) => result,
        Err(_) => Err(InspectError::Timeout {
            url: url.to_string(),
            after,
        }),
    }
}

/// Links and assets of one page after normalization and scope filtering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPage {
    /// In-scope links, in document order
    pub links: Vec<Url>,

    /// Assets, in document order
    pub assets: Vec<Url>,
}

impl ResolvedPage {
    /// Resolves the raw references found on `page_url`
    pub fn resolve(page_url: &Url, refs: RawReferences) -> Self {
        Self {
            links: resolve_references(refs.links, ReferenceKind::Link, page_url),
            assets: resolve_references(refs.assets, ReferenceKind::Asset, page_url),
        }
    }

    /// Converts into the entry recorded in the sitemap
    pub fn into_entry(self) -> SitemapEntry {
        SitemapEntry {
            links: self.links.into_iter().map(String::from).collect(),
            assets: self.assets.into_iter().map(String::from).collect(),
        }
    }
}

/// Builds the sitemap entry for a page from its raw references
pub fn build_entry(page_url: &Url, refs: RawReferences) -> SitemapEntry {
    ResolvedPage::resolve(page_url, refs).into_entry()
}
