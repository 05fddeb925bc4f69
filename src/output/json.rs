use crate::state::Sitemap;

/// Renders a sitemap as pretty-printed JSON
///
/// The document has two members: `pages`, mapping each page URL to its
/// `links` and `assets`, and `unreachable`, the URLs that could not be
/// fetched or parsed.
pub fn render_json(sitemap: &Sitemap) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(sitemap)
}
