//! HTTP fetcher implementation
//!
//! This module turns a URL into a parsed document:
//! - Building the HTTP client with the configured user agent and timeout
//! - Classifying transport failures and HTTP statuses
//! - Retrying connection failures through a [`RetryPolicy`]
//!
//! # Error classification
//!
//! | Condition                      | Error kind          | Retried |
//! |--------------------------------|---------------------|---------|
//! | Timeout / connect / body error | `ConnectionFailure` | yes     |
//! | HTTP 5xx                       | `ConnectionFailure` | yes     |
//! | HTTP 4xx and other non-2xx     | `HttpStatus`        | no      |
//! | Anything else from the client  | `Other`             | no      |

use crate::config::{HttpConfig, RetryConfig};
use crate::crawler::RetryPolicy;
use crate::{ErrorKind, KvartalError};
use reqwest::Client;
use scraper::Html;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use url::Url;

type BodyFuture = Pin<Box<dyn Future<Output = Result<String, KvartalError>> + Send>>;
type BodyLoader = fn(PageRequest) -> BodyFuture;

/// Input of one retried page load
#[derive(Debug, Clone)]
struct PageRequest {
    client: Client,
    url: String,
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use kvartal::config::HttpConfig;
/// use kvartal::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages and parses them into documents, retrying connection failures
pub struct DocumentFetcher {
    client: Client,
    policy: RetryPolicy<BodyLoader>,
}

impl DocumentFetcher {
    /// Creates a fetcher around an existing client
    ///
    /// # Returns
    ///
    /// * `Ok(DocumentFetcher)` - Ready to fetch
    /// * `Err(KvartalError::Config)` - Retry settings out of range
    pub fn new(client: Client, retry: &RetryConfig) -> Result<Self, KvartalError> {
        let policy = RetryPolicy::new(
            load_body as BodyLoader,
            retry.delay_secs,
            ErrorKind::ConnectionFailure,
            retry.max_retries,
        )?;

        Ok(Self { client, policy })
    }

    /// Creates a fetcher with a freshly built client
    pub fn from_config(http: &HttpConfig, retry: &RetryConfig) -> Result<Self, KvartalError> {
        let client = build_http_client(http)?;
        Self::new(client, retry)
    }

    /// Fetches `url` and parses the response body as HTML
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Html))` - The page was fetched
    /// * `Ok(None)` - Retries were exhausted or the server refused the page;
    ///   the failure has already been logged
    /// * `Err(KvartalError::InvalidArgument)` - `url` is not an absolute
    ///   HTTP(S) URL
    pub async fn fetch(&self, url: &str) -> Result<Option<Html>, KvartalError> {
        validate_url(url)?;

        let request = PageRequest {
            client: self.client.clone(),
            url: url.to_string(),
        };

        let body = self.policy.invoke(request).await;
        if body.is_none() {
            tracing::warn!("No document for {}", url);
        }

        Ok(body.map(|body| Html::parse_document(&body)))
    }
}

fn validate_url(url: &str) -> Result<(), KvartalError> {
    let parsed = Url::parse(url)
        .map_err(|e| KvartalError::InvalidArgument(format!("invalid URL '{}': {}", url, e)))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(KvartalError::InvalidArgument(format!(
            "URL '{}' must use HTTP or HTTPS",
            url
        )));
    }

    Ok(())
}

fn load_body(request: PageRequest) -> BodyFuture {
    Box::pin(async move { get_body(&request.client, &request.url).await })
}

/// Performs one GET and classifies the outcome
async fn get_body(client: &Client, url: &str) -> Result<String, KvartalError> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if status.is_server_error() {
        return Err(KvartalError::ConnectionFailure {
            url: url.to_string(),
            message: format!("server responded {}", status),
        });
    }

    if !status.is_success() {
        return Err(KvartalError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| classify_error(url, e))
}

fn classify_error(url: &str, error: reqwest::Error) -> KvartalError {
    if error.is_timeout() || error.is_connect() || error.is_body() {
        KvartalError::ConnectionFailure {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else {
        KvartalError::Client(error)
    }
}
