//! Marketplace collections API client with rate limiting and retry.
//!
//! Fetches the top collections by 24-hour trading volume, following
//! continuation tokens until the requested count is reached. Every page
//! request is retried with exponential backoff before the fetch as a
//! whole is treated as failed; a failed fetch never yields a partial
//! list.
//!
//! # Example
//!
//! ```ignore
//! use rankboard_marketplace::{MarketplaceClient, MarketplaceConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = MarketplaceConfig::default().with_api_key("demo-key");
//!     let client = MarketplaceClient::new(config)?;
//!
//!     let top = client.top_collections(100).await?;
//!     println!("tracking {} collections", top.len());
//!
//!     Ok(())
//! }
//! ```

use crate::error::MarketplaceError;
use crate::models::CollectionsPage;
use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use rankboard_core::{Collection, CollectionSource};
use reqwest::Client;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Default marketplace API base URL.
pub const MARKETPLACE_API_URL: &str = "https://api.reservoir.tools";

/// Base delay for exponential backoff between page retries.
const BASE_RETRY_DELAY: Duration = Duration::from_millis(500);

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the marketplace client.
#[derive(Debug, Clone)]
pub struct MarketplaceConfig {
    /// Base URL for the API.
    pub base_url: String,

    /// API key sent with every request.
    pub api_key: String,

    /// Collections requested per page.
    pub page_size: usize,

    /// Requests per minute limit.
    pub requests_per_minute: NonZeroU32,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Attempts per page before the fetch is treated as failed.
    pub max_retries: u32,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            base_url: MARKETPLACE_API_URL.to_string(),
            api_key: String::new(),
            page_size: 20,
            requests_per_minute: nonzero!(60u32),
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

impl MarketplaceConfig {
    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the rate limit.
    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_minute: NonZeroU32) -> Self {
        self.requests_per_minute = requests_per_minute;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sets the attempts per page.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

// =============================================================================
// MarketplaceClient
// =============================================================================

/// Rate-limited client for the marketplace collections API.
pub struct MarketplaceClient {
    /// Configuration.
    config: MarketplaceConfig,

    /// HTTP client.
    http: Client,

    /// Rate limiter.
    rate_limiter: Arc<
        RateLimiter<
            governor::state::NotKeyed,
            governor::state::InMemoryState,
            governor::clock::DefaultClock,
        >,
    >,
}

impl std::fmt::Debug for MarketplaceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketplaceClient")
            .field("base_url", &self.config.base_url)
            .field("page_size", &self.config.page_size)
            .finish_non_exhaustive()
    }
}

impl MarketplaceClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: MarketplaceConfig) -> Result<Self, MarketplaceError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let quota = Quota::per_minute(config.requests_per_minute);
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            config,
            http,
            rate_limiter,
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Sets a custom base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Waits for the rate limiter and fetches one page.
    async fn get_page(
        &self,
        continuation: Option<&str>,
        limit: usize,
    ) -> Result<CollectionsPage, MarketplaceError> {
        self.rate_limiter.until_ready().await;

        let mut url = format!("{}/collections?limit={}", self.config.base_url, limit);
        if let Some(token) = continuation {
            url.push_str("&continuation=");
            url.push_str(&urlencoding::encode(token));
        }

        tracing::debug!("GET {}", url);

        let mut request = self.http.get(&url).header("Accept", "application/json");
        if !self.config.api_key.is_empty() {
            request = request.header("x-api-key", &self.config.api_key);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MarketplaceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetches one page, retrying with doubling backoff.
    async fn get_page_with_retry(
        &self,
        continuation: Option<&str>,
        limit: usize,
    ) -> Result<CollectionsPage, MarketplaceError> {
        let mut delay = BASE_RETRY_DELAY;
        let mut attempt = 1;

        loop {
            match self.get_page(continuation, limit).await {
                Ok(page) => return Ok(page),
                Err(e) if attempt < self.config.max_retries => {
                    tracing::warn!(
                        attempt,
                        max_retries = self.config.max_retries,
                        error = %e,
                        delay_ms = delay.as_millis() as u64,
                        "Page fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Fetches up to `limit` collections ordered by 24h volume, best
    /// first.
    ///
    /// Follows continuation tokens until the upstream stops returning
    /// one or `limit` records are held. Records without an id are
    /// dropped with a warning; an empty final result is returned as-is
    /// for the caller to treat as a failed cycle.
    ///
    /// # Errors
    /// Returns an error when any page fails after retries. No partial
    /// list is ever returned.
    pub async fn top_collections(
        &self,
        limit: usize,
    ) -> Result<Vec<Collection>, MarketplaceError> {
        let mut collections: Vec<Collection> = Vec::with_capacity(limit);
        let mut continuation: Option<String> = None;

        loop {
            let page_limit = self.config.page_size.min(limit - collections.len());
            let page = self
                .get_page_with_retry(continuation.as_deref(), page_limit)
                .await?;

            let page_len = page.collections.len();
            for raw in page.collections {
                match raw.into_collection() {
                    Some(collection) => collections.push(collection),
                    None => tracing::warn!("Skipping collection record without an id"),
                }
            }

            if collections.len() >= limit || page_len == 0 {
                break;
            }
            match page.continuation {
                Some(token) if !token.is_empty() => continuation = Some(token),
                _ => break,
            }
        }

        collections.truncate(limit);
        tracing::debug!(collections = collections.len(), "Fetched top collections");
        Ok(collections)
    }
}

#[async_trait]
impl CollectionSource for MarketplaceClient {
    async fn fetch_top(&self, limit: usize) -> anyhow::Result<Vec<Collection>> {
        Ok(self.top_collections(limit).await?)
    }
}
