//! URL handling module for Sitewalk
//!
//! This module provides reference normalization and the scope policy that
//! decides which references found on a page are followed as links, which are
//! only recorded as assets, and which are dropped.

mod normalize;
mod scope;

// Re-export main functions
pub use normalize::{normalize_reference, parse_seed};
pub use scope::{in_scope, scope_host};

use url::Url;

/// Role a reference plays on the page it was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// Hyperlink - followed when in scope
    Link,
    /// Script, stylesheet, image, etc. - recorded but never followed
    Asset,
}

/// Resolves one raw reference according to its kind
///
/// Links must normalize and be in scope of the page they were found on.
/// Assets only need to normalize; they are not restricted by host or
/// extension.
///
/// # Arguments
///
/// * `raw` - The reference as written in the document
/// * `kind` - Whether the reference is a link or an asset
/// * `page_url` - The URL of the page holding the reference
///
/// # Returns
///
/// * `Some(Url)` - The canonical URL to record
/// * `None` - The reference is dropped
pub fn resolve_reference(raw: &str, kind: ReferenceKind, page_url: &Url) -> Option<Url> {
    let url = match normalize_reference(raw, page_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Skipping {:?} reference {:?} on {}: {}", kind, raw, page_url, e);
            return None;
        }
    };

    match kind {
        ReferenceKind::Asset => Some(url),
        ReferenceKind::Link => {
            if in_scope(&url, &scope_host(page_url)) {
                Some(url)
            } else {
                tracing::trace!("Link {} is out of scope of {}", url, page_url);
                None
            }
        }
    }
}

/// Resolves every raw reference of one kind, keeping document order
///
/// Duplicates are kept; a page that links to the same target twice lists it
/// twice.
pub fn resolve_references<I, S>(raws: I, kind: ReferenceKind, page_url: &Url) -> Vec<Url>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raws.into_iter()
        .filter_map(|raw| resolve_reference(raw.as_ref(), kind, page_url))
        .collect()
}
