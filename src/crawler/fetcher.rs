//! HTTP fetcher implementation
//!
//! This module handles all page downloads for the crawler, including:
//! - The `PageFetcher` capability the crawl depends on
//! - Building HTTP clients with the configured user agent and timeouts
//! - The `reqwest`-backed fetcher used by the command line

use crate::config::Config;
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use url::Url;

/// Transport-level failure while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Capability to download a page body
///
/// The crawl depends only on this trait, so any transport (or an in-memory
/// fake) can drive it. A response with a non-success status is still a
/// response: implementations return its body and report an error only when
/// the transport itself fails.
///
/// Bodies are expected as UTF-8 text. Transports that know the declared
/// charset decode to UTF-8 before returning.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the body of `url`
    async fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sitewalk::config::Config;
/// use sitewalk::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(config.crawler.fetch_timeout())
        .connect_timeout(config.crawler.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from the configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("{} answered with HTTP {}", url, status.as_u16());
        }

        // Decodes by the Content-Type charset, UTF-8 when none is declared
        let body = response.text().await?;
        Ok(body.into_bytes())
    }
}
