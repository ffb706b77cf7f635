// ABOUTME: Configuration options for the Scraper, and the ScraperBuilder fluent API over them.
// ABOUTME: Covers endpoints, request pacing, timeouts, default headers and an optional pre-built HTTP client.

use std::collections::HashMap;
use std::time::Duration;

use tracing::warn;

use crate::client::Scraper;
use crate::error::ScrapeError;

pub const DEFAULT_BASE_URL: &str = "https://www.imdb.com";
pub const DEFAULT_SUGGESTION_URL: &str = "https://v2.sg.media-imdb.com";
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(1000);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/77.0.3865.90 Safari/537.36";
pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml";

/// Configuration options for the Scraper.
#[derive(Debug, Clone)]
pub struct Options {
    pub base_url: String,
    pub suggestion_url: String,
    /// Pause before every request.
    pub rate_limit: Duration,
    pub timeout: Duration,
    pub user_agent: String,
    pub http_client: Option<reqwest::blocking::Client>,
    pub headers: HashMap<String, String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            suggestion_url: DEFAULT_SUGGESTION_URL.to_string(),
            rate_limit: DEFAULT_RATE_LIMIT,
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_client: None,
            headers: HashMap::from([("accept".to_string(), DEFAULT_ACCEPT.to_string())]),
        }
    }
}

/// Builder for constructing Scraper instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ScraperBuilder {
    opts: Options,
}

impl ScraperBuilder {
    /// Create a new ScraperBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the site root pages are requested from.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.opts.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the root of the search suggestion feed.
    pub fn suggestion_url(mut self, suggestion_url: impl Into<String>) -> Self {
        self.opts.suggestion_url = suggestion_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the pause before each request. Zero is rejected and the current value kept.
    pub fn rate_limit(mut self, rate_limit: Duration) -> Self {
        if rate_limit.is_zero() {
            warn!(
                kept_ms = self.opts.rate_limit.as_millis() as u64,
                "rate limit must be positive, keeping current value"
            );
            return self;
        }
        self.opts.rate_limit = rate_limit;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts
            .headers
            .insert(key.into().to_lowercase(), value.into());
        self
    }

    /// Build the Scraper with the configured options.
    pub fn build(self) -> Result<Scraper, ScrapeError> {
        Scraper::new(self.opts)
    }
}

impl Default for ScraperBuilder {
    fn default() -> Self {
        Self::new()
    }
}
