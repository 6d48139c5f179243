use crate::error::{Error, Result};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.5";

/// Where a page comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Web URL fetched over HTTP(S)
    Web(String),
    /// Local HTML file
    File(PathBuf),
}

/// How to interpret a source string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// `http://` and `https://` are web sources, anything else is a file
    #[default]
    Auto,
    Web,
    File,
}

impl Source {
    /// Interpret a user-supplied source string
    pub fn detect(input: &str, kind: SourceKind) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::MissingSource);
        }

        let source = match kind {
            SourceKind::Web => Source::Web(input.to_string()),
            SourceKind::File => Source::File(PathBuf::from(input)),
            SourceKind::Auto => {
                let lower = input.to_ascii_lowercase();
                if lower.starts_with("http://") || lower.starts_with("https://") {
                    Source::Web(input.to_string())
                } else if let Some(path) = input.strip_prefix("file://") {
                    Source::File(PathBuf::from(path))
                } else {
                    Source::File(PathBuf::from(input))
                }
            }
        };
        ::log::debug!("Classified {} as {:?}", input, source);
        Ok(source)
    }

    /// Identifier recorded in the page snapshot
    pub fn label(&self) -> String {
        match self {
            Source::Web(url) => url.clone(),
            Source::File(path) => path.display().to_string(),
        }
    }
}

/// Retrieves the raw HTML of a source
pub trait Fetcher {
    fn fetch(&self, source: &Source) -> impl Future<Output = Result<String>> + Send;
}

/// HTTP client for web sources
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// GET a page; any non-2xx status is an error
    pub async fn get(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|source| Error::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let network = |e: reqwest::Error| Error::Network {
            url: url.to_string(),
            message: e.to_string(),
        };

        ::log::info!("Fetching page data from: {}", url);
        let response = self
            .client
            .get(parsed)
            .header(ACCEPT, ACCEPT_HTML)
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            ::log::error!("Fetching {} failed with HTTP {}", url, status);
            return Err(Error::Http {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let html = response.text().await.map_err(network)?;
        ::log::info!("Successfully fetched HTML from {}, length: {}", url, html.len());
        Ok(html)
    }
}

/// Reads local HTML files for offline comparisons
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl FileFetcher {
    pub async fn read(&self, path: &Path) -> Result<String> {
        let html = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io(path, e))?;
        ::log::info!("Read {} ({} bytes)", path.display(), html.len());
        Ok(html)
    }
}

/// Fetches web sources with [`HttpFetcher`] and file sources with [`FileFetcher`]
pub struct PageFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl PageFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        Ok(Self {
            http: HttpFetcher::new(timeout, user_agent)?,
            file: FileFetcher,
        })
    }
}

impl Fetcher for PageFetcher {
    async fn fetch(&self, source: &Source) -> Result<String> {
        match source {
            Source::Web(url) => self.http.get(url).await,
            Source::File(path) => self.file.read(path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, headers, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> PageFetcher {
        PageFetcher::new(Duration::from_secs(5), "page-compare-test").unwrap()
    }

    #[test]
    fn test_detect_sources() {
        assert_eq!(
            Source::detect(" https://example.com/a ", SourceKind::Auto).unwrap(),
            Source::Web("https://example.com/a".to_string())
        );
        assert_eq!(
            Source::detect("HTTP://EXAMPLE.COM", SourceKind::Auto).unwrap(),
            Source::Web("HTTP://EXAMPLE.COM".to_string())
        );
        assert_eq!(
            Source::detect("pages/index.html", SourceKind::Auto).unwrap(),
            Source::File(PathBuf::from("pages/index.html"))
        );
        assert_eq!(
            Source::detect("file:///tmp/a.html", SourceKind::Auto).unwrap(),
            Source::File(PathBuf::from("/tmp/a.html"))
        );
        assert_eq!(
            Source::detect("localhost:8080/page", SourceKind::Web).unwrap(),
            Source::Web("localhost:8080/page".to_string())
        );
    }

    #[test]
    fn test_empty_source_is_rejected() {
        assert!(matches!(
            Source::detect("   ", SourceKind::Auto),
            Err(Error::MissingSource)
        ));
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("cache-control", "no-cache"))
            .and(headers("accept-language", vec!["en-US", "en;q=0.5"]))
            .and(headers(
                "accept",
                vec![
                    "text/html",
                    "application/xhtml+xml",
                    "application/xml;q=0.9",
                    "image/webp",
                    "*/*;q=0.8",
                ],
            ))
            .and(header("user-agent", "page-compare-test"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<title>Ok</title>"))
            .expect(1)
            .mount(&server)
            .await;

        let source = Source::Web(format!("{}/page", server.uri()));
        let html = fetcher().fetch(&source).await.unwrap();
        assert_eq!(html, "<title>Ok</title>");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = Source::Web(format!("{}/missing", server.uri()));
        match fetcher().fetch(&source).await {
            Err(Error::Http { status, reason, .. }) => {
                assert_eq!(status, 404);
                assert_eq!(reason, "Not Found");
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let source = Source::Web("not a url".to_string());
        assert!(matches!(
            fetcher().fetch(&source).await,
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.html");
        std::fs::write(&file, "<h1>Local</h1>").unwrap();

        let html = fetcher().fetch(&Source::File(file)).await.unwrap();
        assert_eq!(html, "<h1>Local</h1>");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = Source::File(PathBuf::from("/definitely/not/here.html"));
        assert!(matches!(
            fetcher().fetch(&source).await,
            Err(Error::Io { .. })
        ));
    }
}
