//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `VisitState`: Tracks where a single URL is in its crawl lifecycle (in flight, resolved, unreachable)
//! - `Sitemap`: The crawl result, mapping each visited page to its links and assets
//! - `SitemapEntry`: The links and assets recorded for one page

mod sitemap;
mod visit_state;

// Re-export main types
pub use sitemap::{Sitemap, SitemapEntry};
pub use visit_state::VisitState;
