//! Rate-limited HTTP fetcher
//!
//! This module handles every request the tool makes, including:
//! - Building the HTTP client with a descriptive user agent
//! - Building endpoint URLs under the configured API root
//! - Waiting out throttling responses and re-issuing the same request
//! - Classifying everything else as success or a hard failure
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | Rate-limit status (420/429 by default) | Sleep for the cooldown, retry, no limit |
//! | Other non-2xx status | Immediate → `LongrunError::Status` |
//! | Transport error / timeout | Immediate → `LongrunError::Http` |
//! | Body is not JSON | Immediate → `LongrunError::Json` |

use crate::config::{ApiConfig, UserAgentConfig};
use crate::{LongrunError, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use url::Url;

/// What counts as throttling and how long to back off
#[derive(Debug, Clone)]
pub struct ThrottlePolicy {
    /// Time to wait before re-issuing a throttled request
    pub cooldown: Duration,

    /// Statuses that signal throttling
    pub statuses: Vec<u16>,

    /// Warn on every cooldown instead of logging at debug level
    pub announce: bool,
}

impl ThrottlePolicy {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            cooldown: config.cooldown(),
            statuses: config.rate_limit_statuses.clone(),
            announce: config.log_throttle,
        }
    }

    pub fn is_throttled(&self, status: StatusCode) -> bool {
        self.statuses.contains(&status.as_u16())
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    timeout: Duration,
) -> std::result::Result<Client, reqwest::Error> {
    // Format: Name/Version (+ContactURL)
    let user_agent = format!(
        "{}/{} (+{})",
        user_agent.name, user_agent.version, user_agent.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .build()
}

/// Client for the speedrun.com API
///
/// One request is in flight at a time. Counters are atomics so the client can
/// be shared by reference between the resolvers of a single run.
#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    throttle: ThrottlePolicy,
    page_size: Option<u32>,
    requests: AtomicU64,
    throttle_waits: AtomicU64,
}

impl ApiClient {
    /// Creates a client from the API and user agent configuration
    pub fn new(api: &ApiConfig, user_agent: &UserAgentConfig) -> Result<Self> {
        let client = build_http_client(user_agent, Duration::from_secs(api.request_timeout_secs))?;
        let base_url = Url::parse(&api.base_url)?;

        Ok(Self::with_client(
            client,
            base_url,
            ThrottlePolicy::from_config(api),
            api.page_size,
        ))
    }

    /// Creates a client around an existing `reqwest::Client`
    pub fn with_client(
        client: Client,
        base_url: Url,
        throttle: ThrottlePolicy,
        page_size: Option<u32>,
    ) -> Self {
        Self {
            client,
            base_url,
            throttle,
            page_size,
            requests: AtomicU64::new(0),
            throttle_waits: AtomicU64::new(0),
        }
    }

    /// Builds `<base>/<segments...>?<query>`
    ///
    /// Segments are percent-encoded individually, so opaque ids can never
    /// escape their path position.
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LongrunError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    /// Builds the first-page URL of a listing, adding the page size if configured
    pub fn listing(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.endpoint(segments, query)?;
        if let Some(size) = self.page_size {
            url.query_pairs_mut().append_pair("max", &size.to_string());
        }
        Ok(url)
    }

    /// Fetches a URL and returns its JSON payload
    ///
    /// Throttling responses never surface as errors: the request is re-issued
    /// after the cooldown until the service answers with something else.
    pub async fn fetch_json(&self, url: &Url) -> Result<serde_json::Value> {
        let body = self.fetch_text(url).await?;

        serde_json::from_str(&body).map_err(|source| LongrunError::Json {
            url: url.to_string(),
            source,
        })
    }

    /// Fetches a URL and deserializes its JSON payload into `T`
    pub async fn fetch<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let body = self.fetch_text(url).await?;

        serde_json::from_str(&body).map_err(|source| LongrunError::Json {
            url: url.to_string(),
            source,
        })
    }

    async fn fetch_text(&self, url: &Url) -> Result<String> {
        loop {
            self.requests.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("GET {}", url);

            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|source| LongrunError::Http {
                    url: url.to_string(),
                    source,
                })?;

            let status = response.status();

            if self.throttle.is_throttled(status) {
                self.throttle_waits.fetch_add(1, Ordering::Relaxed);
                let secs = self.throttle.cooldown.as_secs_f64();
                if self.throttle.announce {
                    tracing::warn!(
                        "Rate limit reached ({}) for {}. Waiting {:.0} seconds before retrying",
                        status.as_u16(),
                        url,
                        secs
                    );
                } else {
                    tracing::debug!("Rate limited on {}, cooling down {:.3}s", url, secs);
                }
                tokio::time::sleep(self.throttle.cooldown).await;
                continue;
            }

            if !status.is_success() {
                return Err(LongrunError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            return response.text().await.map_err(|source| LongrunError::Http {
                url: url.to_string(),
                source,
            });
        }
    }

    /// Total HTTP requests issued, retries included
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Number of cooldowns entered
    pub fn throttle_count(&self) -> u64 {
        self.throttle_waits.load(Ordering::Relaxed)
    }
}
