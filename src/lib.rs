//! Sitewalk: a site link and asset mapper
//!
//! This crate crawls a website from a seed URL, following links that stay on
//! the seed's host (or its subdomains), and builds a sitemap from every
//! visited page to the links and assets found on it.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sitewalk operations
#[derive(Debug, Error)]
pub enum SitewalkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
///
/// Apart from `InvalidSeed`, these are raised for single references found on
/// a page; the reference is dropped and the crawl carries on.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Contact link is not followable: {0}")]
    ContactScheme(String),

    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),

    #[error("Invalid seed URL: {0}")]
    InvalidSeed(String),
}

/// Errors raised while inspecting a single page
///
/// An inspection error marks that page unreachable; it is never fatal.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Error fetching {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Document at {url} cannot be parsed: {message}")]
    Parse { url: String, message: String },

    #[error("Fetching {url} timed out after {after:?}")]
    Timeout {
        url: String,
        after: std::time::Duration,
    },
}

/// Result type alias for Sitewalk operations
pub type Result<T> = std::result::Result<T, SitewalkError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, crawl_site, Coordinator, HttpFetcher, PageFetcher};
pub use state::{Sitemap, SitemapEntry, VisitState};
pub use self::url::{in_scope, normalize_reference, parse_seed, scope_host};
