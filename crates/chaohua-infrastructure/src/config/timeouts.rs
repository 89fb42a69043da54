use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://weibo.com";

/// Fixed courtesy delays between upstream calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacingConfig {
    /// Pause between topic-list pages
    pub page_interval: Duration,

    /// Pause after every check-in request, including the last one
    pub sign_interval: Duration,

    /// Pause between accounts (not after the last)
    pub account_interval: Duration,

    /// Hard stop for pagination if the server misreports `max_page`
    pub max_topic_pages: u32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            page_interval: Duration::from_millis(800),
            sign_interval: Duration::from_millis(1500),
            account_interval: Duration::from_secs(10),
            max_topic_pages: 200,
        }
    }
}

impl PacingConfig {
    /// No delays at all, for tests
    pub fn immediate() -> Self {
        Self {
            page_interval: Duration::ZERO,
            sign_interval: Duration::ZERO,
            account_interval: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Upstream HTTP settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Scheme and host of the platform, without trailing slash
    pub base_url: String,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl HttpConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}
