use crate::UrlError;
use url::Url;

/// Reference prefixes that address a person rather than a document
const CONTACT_SCHEMES: &[&str] = &["mailto:", "tel:"];

/// Normalizes a raw reference found on a page into a canonical absolute URL
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Reject contact references (`mailto:`, `tel:`)
/// 3. Resolve against the page URL: a reference without a scheme inherits the
///    page's scheme, one without a host inherits the page's host. A blank
///    reference resolves to the page itself
/// 4. Reject results that still have no host (`javascript:`, `data:`, ...)
/// 5. Remove fragment (everything after #)
///
/// The result is serialized by the `url` crate, so structurally equal URLs
/// always produce identical strings.
///
/// # Arguments
///
/// * `raw` - The reference exactly as it appeared in the document
/// * `base` - The URL of the page the reference was found on
///
/// # Returns
///
/// * `Ok(Url)` - Normalized absolute URL
/// * `Err(UrlError)` - The reference is not followable
///
/// # Examples
///
/// ```
/// use sitewalk::url::normalize_reference;
/// use url::Url;
///
/// let base = Url::parse("http://a.com/y").unwrap();
/// let url = normalize_reference("/path#top", &base).unwrap();
/// assert_eq!(url.as_str(), "http://a.com/path");
/// ```
pub fn normalize_reference(raw: &str, base: &Url) -> Result<Url, UrlError> {
    let reference = raw.trim();

    if is_contact_reference(reference) {
        return Err(UrlError::ContactScheme(reference.to_string()));
    }

    let mut url = base
        .join(reference)
        .map_err(|e| UrlError::Parse(format!("{}: {}", reference, e)))?;

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(reference.to_string()));
    }

    url.set_fragment(None);

    Ok(url)
}

/// Parses the crawl's starting URL
///
/// Unlike page references the seed has nothing to inherit from, so it must be
/// an absolute `http` or `https` URL with a host.
pub fn parse_seed(raw: &str) -> Result<Url, UrlError> {
    let mut url =
        Url::parse(raw.trim()).map_err(|e| UrlError::InvalidSeed(format!("{}: {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidSeed(format!(
            "only http and https seeds are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::InvalidSeed(format!("{} has no host", raw)));
    }

    url.set_fragment(None);

    Ok(url)
}

/// Checks if a reference is a contact link (mail or phone)
fn is_contact_reference(reference: &str) -> bool {
    CONTACT_SCHEMES.iter().any(|scheme| {
        reference
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
