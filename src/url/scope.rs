use url::{Position, Url};

/// Extensions of binary and document files that are never followed as links
const BINARY_EXTENSIONS: &[&str] = &[
    ".pdf", ".jpg", ".jpeg", ".gif", ".svg", ".png", ".doc", ".docx",
];

/// Returns the authority (`host` or `host:port`) that scopes links found on a page
///
/// The port is only present when it differs from the scheme's default, so
/// `https://ex.com:443/` and `https://ex.com/` share the scope `ex.com`.
///
/// # Examples
///
/// ```
/// use sitewalk::url::scope_host;
/// use url::Url;
///
/// let url = Url::parse("https://ex.com/path").unwrap();
/// assert_eq!(scope_host(&url), "ex.com");
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(scope_host(&url), "127.0.0.1:8080");
/// ```
pub fn scope_host(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

/// Checks if a normalized link may be followed from a page scoped to `scope`
///
/// A link is in scope when:
/// 1. Its authority equals `scope`, or is a subdomain of it. The subdomain
///    match is anchored at a label boundary, so `notexample.com` is not in
///    the scope of `example.com`
/// 2. Its path does not end with a binary or document extension
///
/// Assets never go through this check.
///
/// # Arguments
///
/// * `url` - The normalized candidate link
/// * `scope` - The authority of the page the link was found on (see [`scope_host`])
///
/// # Examples
///
/// ```
/// use sitewalk::url::in_scope;
/// use url::Url;
///
/// let sub = Url::parse("https://sub.a.com/page").unwrap();
/// assert!(in_scope(&sub, "a.com"));
///
/// let other = Url::parse("https://xa.com/page").unwrap();
/// assert!(!in_scope(&other, "a.com"));
///
/// let pdf = Url::parse("https://a.com/report.pdf").unwrap();
/// assert!(!in_scope(&pdf, "a.com"));
/// ```
pub fn in_scope(url: &Url, scope: &str) -> bool {
    let candidate = scope_host(url);
    if candidate.is_empty() || scope.is_empty() {
        return false;
    }

    let same_site = candidate == scope || candidate.ends_with(&format!(".{}", scope));

    same_site && !is_binary_document(url)
}

/// Checks if the URL names a binary or document file
///
/// Both the path (`/report.pdf?dl=1`) and the whole URL without its fragment
/// (`/download?file=report.pdf`) are checked.
fn is_binary_document(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    let whole = url[..Position::AfterQuery].to_ascii_lowercase();

    BINARY_EXTENSIONS
        .iter()
        .any(|ext| path.ends_with(ext) || whole.ends_with(ext))
}
