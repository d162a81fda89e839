//! Best-effort web fetches: public LinkedIn profiles and job posting pages.
//!
//! LinkedIn blocks most automated access, so only the Open Graph meta tags and
//! whatever body text is served to anonymous clients are used. Every failure here
//! is non-fatal for the caller.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::LOCATION, redirect::Policy, Client, Response};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use url::{Host, Url};

/// Elements whose text never counts as page content.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "nav", "header", "footer"];
const MAX_JOB_POSTING_LINES: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 200;
const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    #[error("Please provide a valid linkedin.com URL (got '{0}')")]
    NotLinkedIn(String),

    #[error("Could not reach {host}: {source}")]
    Http {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{host} answered with HTTP {status}")]
    Status { host: String, status: u16 },

    #[error("{host} sent more than {limit} bytes")]
    TooLarge { host: String, limit: usize },

    #[error("{host} redirected too many times")]
    TooManyRedirects { host: String },

    #[error("Page could not be parsed: {0}")]
    Parse(String),
}

/// What could be recovered from a public LinkedIn page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedInPage {
    pub name: Option<String>,
    pub description: String,
    pub body_text: String,
}

/// Remote page access. Carried in `AppState` as `Arc<dyn WebFetcher>`.
#[async_trait]
pub trait WebFetcher: Send + Sync {
    async fn fetch_linkedin(&self, url: &str) -> Result<LinkedInPage, FetchError>;

    /// Returns the visible text of a job posting page.
    async fn fetch_job_posting(&self, url: &str) -> Result<String, FetchError>;
}

/// `reqwest`-backed fetcher. Only talks to publicly routable hosts and reads at
/// most `max_body_bytes` of any response.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str, max_body_bytes: usize) -> anyhow::Result<Self> {
        // redirects are followed in `get_html` so every hop is host-checked
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(Policy::none())
            .build()?;
        Ok(Self {
            client,
            max_body_bytes,
        })
    }

    async fn get_html(&self, url: &Url) -> Result<String, FetchError> {
        let mut url = url.clone();

        for _ in 0..=MAX_REDIRECTS {
            ensure_public_host(&url).await?;

            let host = url.host_str().unwrap_or_default().to_string();
            let mut response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|source| FetchError::Http {
                    host: host.clone(),
                    source,
                })?;

            let status = response.status();
            if status.is_redirection() {
                let next = redirect_target(&url, &response)?;
                debug!(from = %url, to = %next, "Following redirect");
                url = next;
                continue;
            }
            if !status.is_success() {
                return Err(FetchError::Status {
                    host,
                    status: status.as_u16(),
                });
            }

            let body = self.read_body(&mut response, &host).await?;
            debug!(url = %url, bytes = body.len(), "Fetched remote page");
            return Ok(body);
        }

        Err(FetchError::TooManyRedirects {
            host: url.host_str().unwrap_or_default().to_string(),
        })
    }

    async fn read_body(&self, response: &mut Response, host: &str) -> Result<String, FetchError> {
        let too_large = || FetchError::TooLarge {
            host: host.to_string(),
            limit: self.max_body_bytes,
        };
        if response
            .content_length()
            .is_some_and(|len| len > self.max_body_bytes as u64)
        {
            return Err(too_large());
        }

        let mut body = CappedBody::new(self.max_body_bytes);
        while let Some(chunk) = response.chunk().await.map_err(|source| FetchError::Http {
            host: host.to_string(),
            source,
        })? {
            if !body.push(&chunk) {
                return Err(too_large());
            }
        }
        Ok(body.into_text())
    }
}

/// Response body accumulator that refuses to grow past `limit` bytes.
struct CappedBody {
    bytes: Vec<u8>,
    limit: usize,
}

impl CappedBody {
    fn new(limit: usize) -> Self {
        Self {
            bytes: Vec::new(),
            limit,
        }
    }

    /// Appends `chunk`; false once the limit would be exceeded.
    fn push(&mut self, chunk: &[u8]) -> bool {
        if self.bytes.len() + chunk.len() > self.limit {
            return false;
        }
        self.bytes.extend_from_slice(chunk);
        true
    }

    fn into_text(self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

fn redirect_target(from: &Url, response: &Response) -> Result<Url, FetchError> {
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| FetchError::Status {
            host: from.host_str().unwrap_or_default().to_string(),
            status: response.status().as_u16(),
        })?;
    let next = from
        .join(location)
        .map_err(|_| FetchError::InvalidUrl(location.to_string()))?;
    parse_http_url(next.as_str())
}

/// Rejects URLs whose host is, or resolves to, a non-public address.
async fn ensure_public_host(url: &Url) -> Result<(), FetchError> {
    let rejected = || FetchError::InvalidUrl(url.to_string());

    let addresses: Vec<IpAddr> = match url.host() {
        Some(Host::Ipv4(ip)) => vec![IpAddr::V4(ip)],
        Some(Host::Ipv6(ip)) => vec![IpAddr::V6(ip)],
        Some(Host::Domain(domain)) => {
            let domain = domain.to_ascii_lowercase();
            if domain == "localhost" || domain.ends_with(".localhost") {
                return Err(rejected());
            }
            let port = url.port_or_known_default().unwrap_or(80);
            let resolved: Vec<IpAddr> = tokio::net::lookup_host((domain.as_str(), port))
                .await
                .map_err(|_| rejected())?
                .map(|addr| addr.ip())
                .collect();
            resolved
        }
        None => return Err(rejected()),
    };

    if addresses.is_empty() || !addresses.iter().copied().all(is_public_ip) {
        warn!(url = %url, "Refusing to fetch from a non-public address");
        return Err(rejected());
    }
    Ok(())
}

/// True for globally routable unicast addresses.
fn is_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, ..] = v4.octets();
            !(v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.is_documentation()
                || v4.is_multicast()
                || a == 0
                // carrier-grade NAT, 100.64.0.0/10
                || (a == 100 && (b & 0xc0) == 64))
        }
        IpAddr::V6(v6) => {
            if let Some(v4) = v6.to_ipv4_mapped() {
                return is_public_ip(IpAddr::V4(v4));
            }
            let first = v6.segments()[0];
            !(v6.is_loopback()
                || v6.is_unspecified()
                || v6.is_multicast()
                // unique local fc00::/7, link-local fe80::/10
                || (first & 0xfe00) == 0xfc00
                || (first & 0xffc0) == 0xfe80)
        }
    }
}

#[async_trait]
impl WebFetcher for HttpFetcher {
    async fn fetch_linkedin(&self, url: &str) -> Result<LinkedInPage, FetchError> {
        let url = validate_linkedin_url(url)?;
        let html = self.get_html(&url).await?;
        parse_linkedin_html(&html)
    }

    async fn fetch_job_posting(&self, url: &str) -> Result<String, FetchError> {
        let url = parse_http_url(url)?;
        let html = self.get_html(&url).await?;
        Ok(visible_text(&Html::parse_document(&html), MAX_JOB_POSTING_LINES))
    }
}

fn parse_http_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|_| FetchError::InvalidUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(FetchError::InvalidUrl(raw.to_string())),
    }
}

pub fn validate_linkedin_url(raw: &str) -> Result<Url, FetchError> {
    let url = parse_http_url(raw)?;
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    if host == "linkedin.com" || host.ends_with(".linkedin.com") {
        Ok(url)
    } else {
        Err(FetchError::NotLinkedIn(raw.to_string()))
    }
}

/// Pulls the Open Graph title/description and visible text from a LinkedIn page.
pub fn parse_linkedin_html(html: &str) -> Result<LinkedInPage, FetchError> {
    let document = Html::parse_document(html);

    let name = meta_content(&document, "og:title")?
        .and_then(|title| title.split('|').next().map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty());
    let description: String = meta_content(&document, "og:description")?
        .unwrap_or_default()
        .chars()
        .take(MAX_DESCRIPTION_CHARS)
        .collect();

    Ok(LinkedInPage {
        name,
        description,
        body_text: visible_text(&document, usize::MAX).replace('\n', " "),
    })
}

fn meta_content(document: &Html, property: &str) -> Result<Option<String>, FetchError> {
    let selector = Selector::parse(&format!(r#"meta[property="{property}"]"#))
        .map_err(|e| FetchError::Parse(e.to_string()))?;
    Ok(document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string()))
}

/// Non-empty text nodes outside scripts, styles and page chrome, one per line.
fn visible_text(document: &Html, max_lines: usize) -> String {
    document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| SKIPPED_ELEMENTS.contains(&e.name()))
            });
            let trimmed = text.trim();
            (!hidden && !trimmed.is_empty()).then_some(trimmed)
        })
        .take(max_lines)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINKEDIN_PAGE: &str = r#"<!DOCTYPE html>
<html><head>
  <meta property="og:title" content="Ada Lovelace | LinkedIn" />
  <meta property="og:description" content="Analytical engine programmer. Python, Rust." />
  <style>.x { color: red }</style>
  <script>var tracking = "docker";</script>
</head>
<body>
  <nav>Sign in</nav>
  <section><h1>Ada Lovelace</h1><p>Experience with Kubernetes and SQL.</p></section>
  <footer>Cookie policy</footer>
</body></html>"#;

    #[test]
    fn test_linkedin_url_validation() {
        assert!(validate_linkedin_url("https://www.linkedin.com/in/ada").is_ok());
        assert!(validate_linkedin_url("https://linkedin.com/in/ada").is_ok());
        assert!(matches!(
            validate_linkedin_url("https://evil-linkedin.com/in/ada"),
            Err(FetchError::NotLinkedIn(_))
        ));
        assert!(matches!(
            validate_linkedin_url("ftp://linkedin.com/in/ada"),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_linkedin_url("not a url"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parses_open_graph_tags() {
        let page = parse_linkedin_html(LINKEDIN_PAGE).unwrap();
        assert_eq!(page.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(page.description, "Analytical engine programmer. Python, Rust.");
    }

    #[test]
    fn test_visible_text_skips_scripts_and_chrome() {
        let page = parse_linkedin_html(LINKEDIN_PAGE).unwrap();
        assert!(page.body_text.contains("Kubernetes and SQL"));
        assert!(!page.body_text.contains("tracking"));
        assert!(!page.body_text.contains("color"));
        assert!(!page.body_text.contains("Sign in"));
        assert!(!page.body_text.contains("Cookie"));
    }

    #[test]
    fn test_missing_meta_tags_are_tolerated() {
        let page = parse_linkedin_html("<html><body><p>hello</p></body></html>").unwrap();
        assert_eq!(page.name, None);
        assert!(page.description.is_empty());
        assert_eq!(page.body_text, "hello");
    }

    #[test]
    fn test_job_posting_text_is_line_capped() {
        let mut html = String::from("<html><body>");
        for i in 0..300 {
            html.push_str(&format!("<p>line {i}</p>"));
        }
        html.push_str("</body></html>");

        let text = visible_text(&Html::parse_document(&html), MAX_JOB_POSTING_LINES);
        assert_eq!(text.lines().count(), MAX_JOB_POSTING_LINES);
        assert!(text.starts_with("line 0"));
    }

    #[test]
    fn test_internal_addresses_are_not_public() {
        for blocked in [
            "127.0.0.1",
            "10.1.2.3",
            "172.16.0.9",
            "192.168.1.1",
            "169.254.169.254",
            "0.0.0.0",
            "100.64.0.1",
            "255.255.255.255",
            "::1",
            "::",
            "fe80::1",
            "fd00::1",
            "::ffff:127.0.0.1",
        ] {
            let ip: IpAddr = blocked.parse().unwrap();
            assert!(!is_public_ip(ip), "{blocked} should be blocked");
        }
        for allowed in ["93.184.216.34", "8.8.8.8", "2606:4700::1111"] {
            let ip: IpAddr = allowed.parse().unwrap();
            assert!(is_public_ip(ip), "{allowed} should be allowed");
        }
    }

    #[tokio::test]
    async fn test_job_posting_on_loopback_is_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let fetcher = HttpFetcher::new(Duration::from_secs(2), "test-agent", 1024).unwrap();

        for url in [
            format!("http://127.0.0.1:{port}/admin"),
            format!("http://localhost:{port}/admin"),
            format!("http://[::1]:{port}/admin"),
        ] {
            let result = fetcher.fetch_job_posting(&url).await;
            assert!(matches!(result, Err(FetchError::InvalidUrl(_))), "{url}: {result:?}");
        }

        // nothing ever connected
        let accepted = tokio::time::timeout(Duration::from_millis(100), listener.accept()).await;
        assert!(accepted.is_err());
    }

    #[test]
    fn test_capped_body_stops_at_limit() {
        let mut body = CappedBody::new(10);
        assert!(body.push(b"<p>hello"));
        assert!(body.push(b"</"));
        assert!(!body.push(b"p>"));
        assert_eq!(body.into_text(), "<p>hello</");
    }
}
