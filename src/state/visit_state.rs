//! Visit state definitions for tracking crawl progress
//!
//! A URL that is absent from the crawl's visit map is unseen; once present it
//! is in exactly one of the states below.

use super::SitemapEntry;
use std::fmt;

/// Represents the current state of a URL in the crawl process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitState {
    // ===== Active States =====
    /// A fetch has been dispatched and its outcome not yet consumed
    InFlight,

    // ===== Terminal States =====
    /// Page was fetched and parsed; holds the links and assets found on it
    Resolved(SitemapEntry),

    /// Page could not be fetched or parsed; holds the reason
    Unreachable(String),
}

impl VisitState {
    /// Returns true while the fetch for this URL is outstanding
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        !self.is_in_flight()
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InFlight => write!(f, "in_flight"),
            Self::Resolved(entry) => write!(
                f,
                "resolved ({} links, {} assets)",
                entry.links.len(),
                entry.assets.len()
            ),
            Self::Unreachable(reason) => write!(f, "unreachable ({})", reason),
        }
    }
}
