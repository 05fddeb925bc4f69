use crate::state::Sitemap;
use std::fmt::Write;

/// Renders a sitemap in the plain text format
///
/// ```text
/// {
///   https://ex.com/: {
///     links: {https://ex.com/a,https://ex.com/b}
///     assets: {https://ex.com/app.js}
///   },
/// }
/// ```
///
/// Pages appear in URL order; links and assets keep document order.
pub fn render_text(sitemap: &Sitemap) -> String {
    let mut out = String::from("{\n");

    for (url, entry) in sitemap.pages() {
        // Writing to a String cannot fail
        let _ = write!(
            out,
            "  {}: {{\n    links: {{{}}}\n    assets: {{{}}}\n  }},\n",
            url,
            entry.links.join(","),
            entry.assets.join(",")
        );
    }

    out.push_str("}\n");
    out
}
