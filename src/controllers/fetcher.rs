// Polite single-shot page fetcher.
use std::time::Duration;

use rand::Rng;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::url::ResourceAddress;
use crate::error::{ExtractError, Result};

pub const DEFAULT_DELAY_MIN: Duration = Duration::from_secs(3);
pub const DEFAULT_DELAY_MAX: Duration = Duration::from_secs(15);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; lyrics-scraper/0.1)";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Lower bound of the random wait before each request
    pub delay_min: Duration,
    /// Upper bound of the random wait before each request
    pub delay_max: Duration,
    /// Whole-request timeout, connect through body
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            delay_min: DEFAULT_DELAY_MIN,
            delay_max: DEFAULT_DELAY_MAX,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    /// Bounds are reordered if given backwards.
    pub fn with_delay(mut self, min: Duration, max: Duration) -> Self {
        self.delay_min = min.min(max);
        self.delay_max = min.max(max);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Uniform draw from `[delay_min, delay_max]`.
    pub fn draw_delay(&self) -> Duration {
        if self.delay_min >= self.delay_max {
            return self.delay_min;
        }
        let secs = rand::thread_rng()
            .gen_range(self.delay_min.as_secs_f64()..=self.delay_max.as_secs_f64());
        Duration::from_secs_f64(secs).clamp(self.delay_min, self.delay_max)
    }
}

#[derive(Debug, Clone)]
pub struct RawPage {
    pub address: ResourceAddress,
    pub status: u16,
    pub body: String,
}

/// Issues one GET per call after a random politeness delay. Never retries.
///
/// Connections are pooled per `Fetcher` (one `reqwest::Client` each), so
/// clones share a pool and separately built fetchers do not.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(3))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ExtractError::Config(format!("http client: {e}")))?;
        Ok(Self { client, config })
    }

    pub async fn fetch(&self, address: &ResourceAddress, cancel: &CancellationToken) -> Result<RawPage> {
        let delay = self.config.draw_delay();
        debug!("waiting {:?} before GET {}", delay, address);
        tokio::select! {
            _ = cancel.cancelled() => return Err(ExtractError::Cancelled),
            _ = tokio::time::sleep(delay) => {}
        }

        let result = tokio::select! {
            _ = cancel.cancelled() => return Err(ExtractError::Cancelled),
            r = self.get(address) => r,
        };

        match &result {
            Ok(page) => info!("Successfully opened URL: {} status={}", address, page.status),
            Err(e) => warn!("Failed to open URL: {} kind={} error={}", address, e.kind(), e),
        }
        result
    }

    async fn get(&self, address: &ResourceAddress) -> Result<RawPage> {
        let resp = self.client.get(address.as_url().clone()).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExtractError::HttpStatus { code: status.as_u16() });
        }

        let body = resp.text().await?;
        Ok(RawPage { address: address.clone(), status: status.as_u16(), body })
    }
}
