//! Output module for rendering crawl results
//!
//! This module handles:
//! - Rendering the sitemap as plain text or JSON
//! - Summarizing crawl statistics

mod json;
pub mod stats;
mod text;

pub use json::render_json;
pub use stats::{print_statistics, CrawlStatistics};
pub use text::render_text;

use crate::state::Sitemap;
use crate::SitewalkError;

/// Output formats for the sitemap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `{ url: { links: {...} assets: {...} }, ... }`
    #[default]
    Text,
    /// Pages and unreachable URLs as a JSON document
    Json,
}

/// Renders a sitemap in the requested format
///
/// # Arguments
///
/// * `sitemap` - The crawl result
/// * `format` - The output format
///
/// # Returns
///
/// * `Ok(String)` - The rendered sitemap
/// * `Err(SitewalkError)` - Serialization failed
pub fn render(sitemap: &Sitemap, format: OutputFormat) -> Result<String, SitewalkError> {
    match format {
        OutputFormat::Text => Ok(render_text(sitemap)),
        OutputFormat::Json => Ok(render_json(sitemap)?),
    }
}
