//! Transport for the TVmaze catalog API.
//!
//! The browsing engine only needs "fetch JSON by URL, fail on non-2xx", which
//! is the [`Fetcher`] trait. [`HttpFetcher`] is the reqwest implementation
//! used by the binary; tests substitute an in-memory one.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::types::ShowId;
use log::{debug, trace};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Fetch and decode a JSON document.
pub trait Fetcher {
    /// GET `url` and decode the body as JSON.
    ///
    /// Fails with [`AppError::Fetch`] on transport errors and non-success
    /// statuses, and with [`AppError::Parse`] if the body is not JSON.
    fn fetch_json(&self, url: &str) -> impl Future<Output = Result<Value>> + Send;
}

/// URL of one page of the show index.
///
/// # Examples
///
/// ```
/// use show_browser::api::catalog_page_url;
///
/// assert_eq!(
///     catalog_page_url("https://api.tvmaze.com", 2),
///     "https://api.tvmaze.com/shows?page=2"
/// );
/// ```
pub fn catalog_page_url(base: &str, page: usize) -> String {
    format!("{}/shows?page={}", base, page)
}

/// URL of the full episode list of a show.
pub fn episodes_url(base: &str, show_id: ShowId) -> String {
    format!("{}/shows/{}/episodes", base, show_id)
}

/// reqwest-backed [`Fetcher`].
///
/// Holds a single client so connections are pooled across requests.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client with the configured user agent and timeout.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::fetch(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::fetch(url, format!("HTTP {}", status)));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| AppError::Parse(format!("Invalid JSON from {}: {}", url, e)))?;

        trace!("GET {} -> {}", url, status);

        Ok(body)
    }
}
