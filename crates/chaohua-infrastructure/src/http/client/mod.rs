mod check_in;
mod topics;
mod types;

pub use check_in::parse_check_in_response;
pub use topics::parse_topic_page;
pub use types::{
    CHECK_IN_API, CHECK_IN_LOCATION, CHECK_IN_PATH, TOPIC_LIST_PATH, TOPIC_TAB_ID, USER_AGENT,
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};

use chaohua_domain::check_in::{ChaohuaApi, CheckInError, CheckinOutcome, Topic, TopicPage};
use chaohua_domain::credential::Credential;

use crate::config::HttpConfig;

/// HTTP client bound to one account's cookie
///
/// Every request carries the browser-like default headers, the cookie and, when the
/// cookie has one, the `X-XSRF-TOKEN` header. `Accept-Encoding` is negotiated by
/// reqwest (gzip, deflate, br).
pub struct WeiboHttpClient {
    pub(super) client: Client,
    pub(super) base_url: String,
}

impl WeiboHttpClient {
    pub fn new(credential: &Credential, config: &HttpConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)
            .with_context(|| format!("Invalid base URL: {}", config.base_url))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(Self::default_headers(credential)?)
            .timeout(config.request_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn default_headers(credential: &Credential) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
        );
        headers.insert(
            header::CONNECTION,
            header::HeaderValue::from_static("keep-alive"),
        );
        headers.insert(
            header::HeaderName::from_static("sec-fetch-dest"),
            header::HeaderValue::from_static("empty"),
        );
        headers.insert(
            header::HeaderName::from_static("sec-fetch-mode"),
            header::HeaderValue::from_static("cors"),
        );
        headers.insert(
            header::HeaderName::from_static("sec-fetch-site"),
            header::HeaderValue::from_static("same-origin"),
        );

        let mut cookie = header::HeaderValue::from_str(credential.as_str())
            .context("Cookie is not a valid header value")?;
        cookie.set_sensitive(true);
        headers.insert(header::COOKIE, cookie);

        if let Some(token) = credential.xsrf_token() {
            let mut value = header::HeaderValue::from_str(token)
                .context("XSRF-TOKEN is not a valid header value")?;
            value.set_sensitive(true);
            headers.insert(header::HeaderName::from_static("x-xsrf-token"), value);
        }

        Ok(headers)
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ChaohuaApi for WeiboHttpClient {
    async fn fetch_topic_page(&self, page: u32) -> Result<TopicPage, CheckInError> {
        self.request_topic_page(page).await
    }

    async fn check_in(&self, topic: &Topic) -> CheckinOutcome {
        self.request_check_in(topic).await
    }
}
