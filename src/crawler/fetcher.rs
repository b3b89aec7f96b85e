//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building HTTP clients with compression support
//! - Building tag page URLs
//! - GET requests with the configured headers and timeout
//! - Retry logic for non-200 responses and transport failures

use crate::config::{ScraperConfig, DEFAULT_USER_AGENT};
use crate::ConfigResult;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Value of the `Accept-Language` header sent with every request
pub const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// Raw response of a single GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

/// Failure to obtain any response at all
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// Capability to perform a single HTTP GET
///
/// The fetcher layers retries and status handling on top of this; an
/// implementation performs exactly one request per call.
pub trait Transport: Send + Sync {
    fn get(
        &self,
        url: &str,
        headers: &HeaderMap,
        timeout: Duration,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// `Transport` backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        headers: &HeaderMap,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .headers(headers.clone())
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}

/// Builds an HTTP client with proper configuration
///
/// Headers and the request timeout are applied per request, so the client
/// itself only carries connection-level settings.
///
/// # Example
///
/// ```no_run
/// use hashtag_lens::crawler::build_http_client;
///
/// let client = build_http_client().unwrap();
/// ```
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the public page URL for a tag
///
/// Leading `#` characters are stripped from the tag.
///
/// # Example
///
/// ```
/// use hashtag_lens::crawler::build_tag_url;
///
/// assert_eq!(
///     build_tag_url("https://www.instagram.com", "#travel"),
///     "https://www.instagram.com/explore/tags/travel/"
/// );
/// ```
pub fn build_tag_url(base_url: &str, tag: &str) -> String {
    format!(
        "{}/explore/tags/{}/",
        base_url.trim_end_matches('/'),
        tag.trim_start_matches('#')
    )
}

/// Retrying fetcher for tag pages
#[derive(Debug, Clone)]
pub struct PageFetcher<T> {
    transport: T,
    base_url: String,
    headers: HeaderMap,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
}

impl<T: Transport> PageFetcher<T> {
    /// Builds a fetcher from validated settings
    ///
    /// Fails only when `sleep_between_requests` cannot be turned into a delay.
    pub fn new(transport: T, config: &ScraperConfig) -> ConfigResult<Self> {
        let user_agent = HeaderValue::from_str(&config.user_agent).unwrap_or_else(|e| {
            tracing::warn!(
                "Configured user agent is not a valid header value ({}); using default",
                e
            );
            HeaderValue::from_static(DEFAULT_USER_AGENT)
        });

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, user_agent);
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));

        Ok(Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers,
            timeout: config.timeout(),
            max_retries: config.max_retries.max(1),
            retry_delay: config.retry_delay()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Page URL for `tag` under the configured base URL
    pub fn page_url(&self, tag: &str) -> String {
        build_tag_url(&self.base_url, tag)
    }

    /// Fetches the raw markup of a tag page
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | HTTP 200 | Return body immediately |
    /// | Any other status | Log, wait, retry |
    /// | Transport failure | Log, wait, retry |
    ///
    /// At most `max_retries` attempts are made, with `sleep_between_requests`
    /// between consecutive attempts.
    ///
    /// # Returns
    ///
    /// * `Some(String)` - The page body
    /// * `None` - Every attempt failed
    pub async fn fetch(&self, tag: &str) -> Option<String> {
        let url = self.page_url(tag);
        let mut last_error: Option<String> = None;

        for attempt in 1..=self.max_retries {
            tracing::debug!("GET {} (attempt {}/{})", url, attempt, self.max_retries);

            match self.transport.get(&url, &self.headers, self.timeout).await {
                Ok(response) if response.status == 200 => {
                    tracing::debug!("Received 200 for {}", url);
                    return Some(response.body);
                }
                Ok(response) => {
                    tracing::warn!(
                        "Non-200 response ({}) for {}: {}",
                        response.status,
                        url,
                        body_preview(&response.body)
                    );
                    last_error = Some(format!("HTTP {}", response.status));
                }
                Err(e) => {
                    tracing::warn!("Error fetching {}: {}", url, e);
                    last_error = Some(e.to_string());
                }
            }

            if attempt < self.max_retries && !self.retry_delay.is_zero() {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        tracing::error!(
            "Failed to fetch hashtag page for {} after {} attempts. Last error: {}",
            tag,
            self.max_retries,
            last_error.as_deref().unwrap_or("none")
        );
        None
    }
}

/// First 200 characters of a response body, for log lines
fn body_preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
