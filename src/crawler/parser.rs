//! HTML parser for extracting raw references
//!
//! This module handles parsing a fetched body as an HTML document and
//! collecting, unresolved and unfiltered:
//! - Link references (`href` of `<a>` elements)
//! - Asset references (`src` of any element, then `href` of `<link>` elements)

use scraper::{Html, Selector};

/// Raw references found in one document, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawReferences {
    /// `href` of every `a[href]` element
    pub links: Vec<String>,

    /// `src` of every `[src]` element, followed by `href` of every `link[href]` element
    pub assets: Vec<String>,
}

/// Parses a fetched body and extracts its raw references
///
/// # Arguments
///
/// * `body` - The page body as fetched
///
/// # Returns
///
/// * `Ok(RawReferences)` - The references found in the document
/// * `Err(String)` - The body cannot be read as a document
///
/// # Example
///
/// ```
/// use sitewalk::crawler::parse_document;
///
/// let body = br#"<html><body><a href="/page">Link</a><img src="logo.png"></body></html>"#;
/// let refs = parse_document(body).unwrap();
/// assert_eq!(refs.links, vec!["/page"]);
/// assert_eq!(refs.assets, vec!["logo.png"]);
/// ```
pub fn parse_document(body: &[u8]) -> Result<RawReferences, String> {
    let html = std::str::from_utf8(body)
        .map_err(|e| format!("body is not valid UTF-8 text: {}", e))?;

    parse_html(html)
}

/// Extracts raw references from HTML text
pub fn parse_html(html: &str) -> Result<RawReferences, String> {
    let document = Html::parse_document(html);

    let links = select_attribute(&document, "a[href]", "href")?;

    let mut assets = select_attribute(&document, "[src]", "src")?;
    assets.extend(select_attribute(&document, "link[href]", "href")?);

    Ok(RawReferences { links, assets })
}

/// Reads `attribute` from every element matching `selector`, in document order
fn select_attribute(document: &Html, selector: &str, attribute: &str) -> Result<Vec<String>, String> {
    let selector =
        Selector::parse(selector).map_err(|e| format!("invalid selector {}: {:?}", selector, e))?;

    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr(attribute))
        .map(str::to_string)
        .collect())
}
