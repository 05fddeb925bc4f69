use super::VisitState;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Links and assets recorded for one visited page
///
/// Both lists keep the order of first appearance in the document and may
/// contain duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SitemapEntry {
    /// In-scope links, absolute and normalized
    pub links: Vec<String>,

    /// Asset references (scripts, stylesheets, images, ...), absolute and normalized
    pub assets: Vec<String>,
}

/// The result of a crawl
///
/// Maps every page that was fetched and parsed to its entry. Pages that could
/// not be reached have no entry; they are listed in `unreachable` instead, and
/// still appear in the `links` or `assets` of the pages referring to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sitemap {
    pages: BTreeMap<String, SitemapEntry>,
    unreachable: BTreeSet<String>,
}

impl Sitemap {
    /// Creates an empty sitemap
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the entry for a page, replacing any previous one
    pub fn insert(&mut self, url: impl Into<String>, entry: SitemapEntry) {
        self.pages.insert(url.into(), entry);
    }

    /// Records a page that could not be fetched or parsed
    pub fn mark_unreachable(&mut self, url: impl Into<String>) {
        self.unreachable.insert(url.into());
    }

    /// Gets the entry for a page
    pub fn get(&self, url: &str) -> Option<&SitemapEntry> {
        self.pages.get(url)
    }

    /// Returns true if the page has an entry
    pub fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    /// Returns true if the page was found unreachable
    pub fn is_unreachable(&self, url: &str) -> bool {
        self.unreachable.contains(url)
    }

    /// Number of pages with an entry
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if no page has an entry
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterates over pages and their entries in URL order
    pub fn pages(&self) -> impl Iterator<Item = (&str, &SitemapEntry)> {
        self.pages.iter().map(|(url, entry)| (url.as_str(), entry))
    }

    /// Iterates over unreachable URLs in order
    pub fn unreachable(&self) -> impl Iterator<Item = &str> {
        self.unreachable.iter().map(String::as_str)
    }

    /// Number of unreachable URLs
    pub fn unreachable_count(&self) -> usize {
        self.unreachable.len()
    }
}

/// Builds the sitemap from a finished crawl's visit map
///
/// URLs still in flight carry no result and are skipped; a crawl only
/// produces its sitemap once nothing is in flight.
impl FromIterator<(String, VisitState)> for Sitemap {
    fn from_iter<T: IntoIterator<Item = (String, VisitState)>>(iter: T) -> Self {
        let mut sitemap = Sitemap::new();
        for (url, state) in iter {
            match state {
                VisitState::Resolved(entry) => sitemap.insert(url, entry),
                VisitState::Unreachable(_) => sitemap.mark_unreachable(url),
                VisitState::InFlight => {
                    tracing::warn!("{} was still in flight when the sitemap was built", url);
                }
            }
        }
        sitemap
    }
}
