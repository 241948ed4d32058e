//! Rate-limited HTTP fetching with charset detection
//!
//! Each phase owns one fetcher: discovery shares a client across
//! relevance probes, sitemap pulls, and hub pages, while the downloader
//! keeps its own. A direct governor limiter spaces requests out, and
//! response bodies are decoded from whatever charset the server or page
//! declares. Persian sites in particular still answer with windows-1256
//! now and then.

use std::num::NonZeroU32;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use regex::Regex;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client,
};
use url::Url;

use crate::config::Config;
use crate::utils::error::FetchError;

/// Finds a charset declaration in a Content-Type header or a meta tag.
static CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset=["']?([a-zA-Z0-9_-]+)"#).unwrap());

/// A fetched page body with its status and the Content-Type the server sent.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code of the response.
    pub status: u16,
    /// Raw Content-Type header value, empty when the server sent none.
    pub content_type: String,
    /// Decoded body text.
    pub body: String,
}

impl FetchedPage {
    /// Whether the response is worth handing to the HTML extractor.
    ///
    /// Images and non-HTML application payloads are rejected. A missing
    /// Content-Type passes: plenty of small sites never set one.
    #[must_use]
    pub fn is_probably_html(&self) -> bool {
        let ct = self.content_type.to_lowercase();
        if ct.contains("image") {
            return false;
        }
        !(ct.contains("application") && !ct.contains("html"))
    }

    /// Whether the response looks like an XML document.
    ///
    /// Either the header says so or the body opens with an XML
    /// declaration. Sitemaps served as `text/plain` are common enough
    /// that the body check earns its keep.
    #[must_use]
    pub fn looks_like_xml(&self) -> bool {
        self.content_type.to_lowercase().contains("xml")
            || self.body.trim_start().starts_with("<?xml")
    }
}

/// HTTP fetcher shared across a crawl run
///
/// Wraps a [`reqwest::Client`] configured from [`Config`] with a
/// process-wide request rate limit.
pub struct PageFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Rate limiter to control request frequency
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl PageFetcher {
    /// Create a fetcher from the crawler section of the configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        if let Ok(ua) = HeaderValue::from_str(&config.crawler.user_agent) {
            headers.insert(USER_AGENT, ua);
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );

        let client = Client::builder()
            .timeout(config.request_timeout())
            .gzip(true)
            .cookie_store(true)
            .default_headers(headers)
            .build()?;

        let rate =
            NonZeroU32::new(config.crawler.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Fetch a page, waiting for the rate limiter first
    ///
    /// Any HTTP status yields a page; callers decide what a non-200
    /// means for them.
    ///
    /// # Errors
    ///
    /// * `FetchError::InvalidUrl` - the URL does not parse
    /// * `FetchError::Timeout` - the request or body read timed out
    /// * `FetchError::Http` - any other transport failure
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;

        self.rate_limiter.until_ready().await;

        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) if e.is_timeout() => return Err(FetchError::Timeout),
            Err(e) => return Err(FetchError::Http(e)),
        };

        let status = response.status().as_u16();

        // Keep the header before the response is consumed for its body.
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
            .unwrap_or_default();

        let bytes = match response.bytes().await {
            Ok(b) => b,
            Err(e) if e.is_timeout() => return Err(FetchError::Timeout),
            Err(e) => return Err(FetchError::Http(e)),
        };

        let body = decode_bytes(&bytes, &content_type);

        Ok(FetchedPage {
            status,
            content_type,
            body,
        })
    }
}

/// Decode raw bytes using the declared charset, a sniffed meta charset,
/// or lossy UTF-8 in that order
///
/// The header label wins when present and recognized. Otherwise the
/// first kilobyte is scanned for a `<meta charset=...>` declaration,
/// which is ASCII-compatible in every encoding worth supporting.
#[must_use]
pub fn decode_bytes(bytes: &[u8], content_type: &str) -> String {
    if let Some(enc) = charset_label(content_type).and_then(|l| Encoding::for_label(l.as_bytes()))
    {
        let (text, _, _) = enc.decode(bytes);
        return text.into_owned();
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(1024)]);
    if let Some(enc) = charset_label(&head).and_then(|l| Encoding::for_label(l.as_bytes())) {
        let (text, _, _) = enc.decode(bytes);
        return text.into_owned();
    }

    let (text, _, _) = UTF_8.decode(bytes);
    text.into_owned()
}

/// Pull the charset label out of a header value or HTML fragment.
fn charset_label(s: &str) -> Option<&str> {
    CHARSET_RE
        .captures(s)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
