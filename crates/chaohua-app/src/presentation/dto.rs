use serde::{Deserialize, Serialize};

use chaohua_domain::check_in::AccountRunResult;

use crate::application::services::StoredCookie;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// JSON envelope shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<CookieView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<AccountRunResult>>,
}

impl ApiResponse {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            msg: msg.into(),
            cookies: None,
            logs: None,
            results: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            ..Self::success(msg)
        }
    }

    pub fn with_cookies(mut self, cookies: Vec<CookieView>) -> Self {
        self.cookies = Some(cookies);
        self
    }

    /// Attach batch results plus every account's rendered log lines, in order
    pub fn with_results(mut self, results: Vec<AccountRunResult>) -> Self {
        let logs = results
            .iter()
            .flat_map(|account| account.result.logs.iter())
            .map(|entry| entry.message.clone())
            .collect();
        self.logs = Some(logs);
        self.results = Some(results);
        self
    }
}

/// Stored cookie as listed in the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieView {
    pub index: usize,
    pub show: String,
    pub raw: String,
}

impl From<StoredCookie> for CookieView {
    fn from(cookie: StoredCookie) -> Self {
        Self {
            index: cookie.index,
            show: cookie.masked,
            raw: cookie.raw,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddCookieForm {
    #[serde(default)]
    pub cookie: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteCookieForm {
    #[serde(default)]
    pub index: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,
}
