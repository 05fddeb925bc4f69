//! Integration tests for the crawler
//!
//! Most tests drive the crawl through an in-memory `PageFetcher` that counts
//! requests per URL, so hosts like `www.ex.com` can be served without DNS.
//! The HTTP tests use wiremock to create mock servers and run the full
//! fetch, parse, and crawl cycle end-to-end.

use async_trait::async_trait;
use sitewalk::config::{Config, CrawlerConfig};
use sitewalk::crawler::{crawl, crawl_site, FetchError, PageFetcher};
use sitewalk::output::{render, OutputFormat};
use sitewalk::url::parse_seed;
use sitewalk::Sitemap;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves pages from memory, with an optional per-URL delay
#[derive(Default)]
struct MemoryFetcher {
    pages: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    requests: Mutex<HashMap<String, usize>>,
}

impl MemoryFetcher {
    fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    fn requests(&self, url: &str) -> usize {
        self.requests.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    fn total_requests(&self) -> usize {
        self.requests.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl PageFetcher for MemoryFetcher {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        *self
            .requests
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;

        if let Some(delay) = self.delays.get(url.as_str()) {
            tokio::time::sleep(*delay).await;
        }

        self.pages
            .get(url.as_str())
            .map(|html| html.clone().into_bytes())
            .ok_or_else(|| FetchError::Transport(format!("connection refused: {}", url)))
    }
}

const ROOT_HTML: &str = r#"<html>
<head>
  <title>Example</title>
  <link rel="stylesheet" href="styles.css">
  <script src="app.js"></script>
</head>
<body>
  <a href="https://ex.com/section-1">Section 1</a>
  <a href="/section-2#intro">Section 2</a>
  <a href="https://www.ex.com/subdomain">Subdomain</a>
  <a href="mailto:info@ex.com">Mail us</a>
  <a href="tel:+15550100">Call us</a>
  <a href="https://external.com/partner">Partner</a>
  <a href="/brochure.pdf">Brochure</a>
  <img src="https://external.com/img1.jpg">
</body>
</html>"#;

const SECTION_1_HTML: &str = r#"<html>
<head><link rel="stylesheet" href="/styles.css"></head>
<body><a href="/section-1-1">Section 1.1</a></body>
</html>"#;

const SECTION_2_HTML: &str = r#"<html>
<head><link rel="stylesheet" href="styles.css"></head>
<body><a href="section-1-1">Section 1.1</a></body>
</html>"#;

const SECTION_1_1_HTML: &str = r#"<html>
<head><link rel="stylesheet" href="/styles.css"></head>
<body><p>Leaf page</p></body>
</html>"#;

const SUBDOMAIN_HTML: &str = r#"<html><body><p>Nothing here</p></body></html>"#;

fn example_site() -> MemoryFetcher {
    MemoryFetcher::default()
        .with_page("https://ex.com/", ROOT_HTML)
        .with_page("https://ex.com/section-1", SECTION_1_HTML)
        .with_page("https://ex.com/section-2", SECTION_2_HTML)
        .with_page("https://ex.com/section-1-1", SECTION_1_1_HTML)
        .with_page("https://www.ex.com/subdomain", SUBDOMAIN_HTML)
}

async fn crawl_memory(fetcher: &Arc<MemoryFetcher>, seed: &str) -> Sitemap {
    let seed = parse_seed(seed).expect("Failed to parse seed");
    crawl(fetcher.clone(), &CrawlerConfig::default(), &seed).await
}

#[tokio::test]
async fn test_crawls_entire_site() {
    let fetcher = Arc::new(example_site());

    let sitemap = crawl_memory(&fetcher, "https://ex.com").await;

    assert_eq!(sitemap.len(), 5);
    assert_eq!(sitemap.unreachable_count(), 0);

    let root = sitemap.get("https://ex.com/").expect("Missing seed entry");
    assert_eq!(
        root.links,
        vec![
            "https://ex.com/section-1",
            "https://ex.com/section-2",
            "https://www.ex.com/subdomain",
        ]
    );
    for asset in [
        "https://ex.com/app.js",
        "https://external.com/img1.jpg",
        "https://ex.com/styles.css",
    ] {
        assert!(root.assets.contains(&asset.to_string()), "missing {}", asset);
    }

    for section in ["https://ex.com/section-1", "https://ex.com/section-2"] {
        let entry = sitemap.get(section).expect("Missing section entry");
        assert_eq!(entry.links, vec!["https://ex.com/section-1-1"]);
        assert_eq!(entry.assets, vec!["https://ex.com/styles.css"]);
    }

    let leaf = sitemap.get("https://ex.com/section-1-1").unwrap();
    assert!(leaf.links.is_empty());
    assert_eq!(leaf.assets, vec!["https://ex.com/styles.css"]);

    let subdomain = sitemap.get("https://www.ex.com/subdomain").unwrap();
    assert!(subdomain.links.is_empty());
    assert!(subdomain.assets.is_empty());

    assert_eq!(fetcher.requests("https://ex.com/section-1-1"), 1);
    assert_eq!(fetcher.total_requests(), 5);
}

#[tokio::test]
async fn test_out_of_scope_and_binary_links_never_fetched() {
    let fetcher = Arc::new(example_site());

    crawl_memory(&fetcher, "https://ex.com").await;

    assert_eq!(fetcher.requests("https://external.com/partner"), 0);
    assert_eq!(fetcher.requests("https://ex.com/brochure.pdf"), 0);
    assert_eq!(fetcher.requests("https://external.com/img1.jpg"), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_target_fetched_once_under_any_schedule() {
    for run in 0..20u64 {
        // Vary which section finishes first from run to run
        let fetcher = Arc::new(
            example_site()
                .with_delay("https://ex.com/section-1", Duration::from_millis(run % 4))
                .with_delay(
                    "https://ex.com/section-2",
                    Duration::from_millis((run * 3) % 5),
                )
                .with_delay(
                    "https://www.ex.com/subdomain",
                    Duration::from_millis((run * 7) % 3),
                ),
        );

        let sitemap = crawl_memory(&fetcher, "https://ex.com").await;

        assert_eq!(sitemap.len(), 5, "run {}", run);
        assert_eq!(
            fetcher.requests("https://ex.com/section-1-1"),
            1,
            "run {}",
            run
        );
        assert_eq!(fetcher.total_requests(), 5, "run {}", run);
    }
}

#[tokio::test]
async fn test_failed_link_is_contained() {
    let fetcher = Arc::new(
        MemoryFetcher::default()
            .with_page(
                "https://ex.com/",
                r#"<a href="/ok">OK</a><a href="/broken">Broken</a>"#,
            )
            .with_page("https://ex.com/ok", r#"<a href="/broken">Broken again</a>"#),
    );

    let sitemap = crawl_memory(&fetcher, "https://ex.com/").await;

    let root = sitemap.get("https://ex.com/").unwrap();
    assert_eq!(root.links, vec!["https://ex.com/ok", "https://ex.com/broken"]);
    assert!(!sitemap.contains("https://ex.com/broken"));
    assert!(sitemap.is_unreachable("https://ex.com/broken"));
    assert_eq!(sitemap.len(), 2);
    assert_eq!(fetcher.requests("https://ex.com/broken"), 1);
}

#[tokio::test]
async fn test_unparsable_page_is_contained() {
    let fetcher = Arc::new(
        MemoryFetcher::default().with_page("https://ex.com/", r#"<a href="/binary">Bin</a>"#),
    );
    // Pages are served as UTF-8 strings, so route the invalid body through a
    // dedicated fetcher instead
    struct Mixed(Arc<MemoryFetcher>);

    #[async_trait]
    impl PageFetcher for Mixed {
        async fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
            if url.path() == "/binary" {
                return Ok(vec![0xde, 0xad, 0xbe, 0xef, 0xff]);
            }
            self.0.get(url).await
        }
    }

    let seed = parse_seed("https://ex.com/").unwrap();
    let sitemap = crawl(
        Arc::new(Mixed(fetcher.clone())),
        &CrawlerConfig::default(),
        &seed,
    )
    .await;

    assert_eq!(sitemap.len(), 1);
    assert!(sitemap.is_unreachable("https://ex.com/binary"));
}

#[tokio::test]
async fn test_concurrency_limit_of_one_still_completes() {
    let fetcher = Arc::new(example_site());
    let config = CrawlerConfig {
        max_concurrent_fetches: 1,
        ..CrawlerConfig::default()
    };

    let seed = parse_seed("https://ex.com").unwrap();
    let sitemap = crawl(fetcher.clone(), &config, &seed).await;

    assert_eq!(sitemap.len(), 5);
    assert_eq!(fetcher.total_requests(), 5);
}

#[tokio::test]
async fn test_text_output_of_example_site() {
    let fetcher = Arc::new(example_site());

    let sitemap = crawl_memory(&fetcher, "https://ex.com").await;
    let text = render(&sitemap, OutputFormat::Text).unwrap();

    assert!(text.starts_with("{\n"));
    assert!(text.contains(
        "  https://ex.com/section-1-1: {\n    links: {}\n    assets: {https://ex.com/styles.css}\n  },\n"
    ));
    assert!(text.ends_with("}\n"));
}

/// Builds a config suitable for talking to a local mock server
fn http_config(fetch_timeout: u64) -> Config {
    let mut config = Config::default();
    config.crawler.fetch_timeout = fetch_timeout;
    config.crawler.connect_timeout = 1;
    config
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.to_string())
        .insert_header("content-type", "text/html")
}

#[tokio::test]
async fn test_full_crawl_over_http() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><head><script src="/app.js"></script></head><body>
            <a href="/page1">Page 1</a>
            <a href="/page2">Page 2</a>
            <a href="/missing">Missing</a>
            </body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html(r#"<html><body><a href="/page2">Page 2</a></body></html>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html(r#"<html><body><a href="/page1">Page 1</a></body></html>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    // A 404 with a body is still a document
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"<html><body><a href="/">Home</a></body></html>"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let seed = parse_seed(&base_url).unwrap();
    let sitemap = crawl_site(&http_config(5), &seed)
        .await
        .expect("Crawl failed");

    assert_eq!(sitemap.len(), 4);
    assert_eq!(
        sitemap.get(&format!("{}/", base_url)).unwrap().assets,
        vec![format!("{}/app.js", base_url)]
    );
    assert_eq!(
        sitemap.get(&format!("{}/missing", base_url)).unwrap().links,
        vec![format!("{}/", base_url)]
    );
}

#[tokio::test]
async fn test_slow_page_times_out_and_crawl_terminates() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><body><a href="/fast">Fast</a><a href="/slow">Slow</a></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(html("<html><body>Fast</body></html>"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("<html><body>Slow</body></html>").set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let seed = parse_seed(&base_url).unwrap();
    let sitemap = tokio::time::timeout(
        Duration::from_secs(4),
        crawl_site(&http_config(1), &seed),
    )
    .await
    .expect("Crawl did not terminate")
    .expect("Crawl failed");

    assert_eq!(sitemap.len(), 2);
    assert!(sitemap.contains(&format!("{}/fast", base_url)));
    assert!(sitemap.is_unreachable(&format!("{}/slow", base_url)));
}

#[tokio::test]
async fn test_json_output_over_http() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<html><body><link rel="stylesheet" href="/s.css"></body></html>"#))
        .mount(&mock_server)
        .await;

    let seed = parse_seed(&base_url).unwrap();
    let sitemap = crawl_site(&http_config(5), &seed).await.unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&render(&sitemap, OutputFormat::Json).unwrap()).unwrap();

    assert_eq!(
        json["pages"][format!("{}/", base_url)]["assets"][0],
        format!("{}/s.css", base_url)
    );
    assert_eq!(json["unreachable"], serde_json::json!([]));
}

#[tokio::test]
async fn test_latin1_page_is_crawled() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<html><body><a href="/cafe">Caf&eacute;</a></body></html>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cafe"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"<html><body>Caf\xe9 <a href=\"/\">Home</a></body></html>".to_vec(),
            "text/html; charset=iso-8859-1",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let seed = parse_seed(&base_url).unwrap();
    let sitemap = crawl_site(&http_config(5), &seed).await.unwrap();

    assert_eq!(sitemap.len(), 2);
    assert_eq!(sitemap.unreachable_count(), 0);
    assert_eq!(
        sitemap.get(&format!("{}/cafe", base_url)).unwrap().links,
        vec![format!("{}/", base_url)]
    );
}

#[tokio::test]
async fn test_blank_and_download_links_over_http() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><body>
            <a href="">Reload</a>
            <a href="/download?file=report.pdf">Report</a>
            </body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x25, 0x50, 0x44, 0x46]))
        .expect(0)
        .mount(&mock_server)
        .await;

    let seed = parse_seed(&base_url).unwrap();
    let sitemap = crawl_site(&http_config(5), &seed).await.unwrap();

    assert_eq!(sitemap.len(), 1);
    assert_eq!(
        sitemap.get(&format!("{}/", base_url)).unwrap().links,
        vec![format!("{}/", base_url)]
    );
}
