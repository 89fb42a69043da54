use serde::Deserialize;
use serde_json::Value;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Followed-topic list endpoint
pub const TOPIC_LIST_PATH: &str = "/ajax/profile/topicContent";
pub const TOPIC_TAB_ID: &str = "231093_-_chaohua";

/// Object-id prefix marking a topic item; the id is the remainder
pub const TOPIC_OID_PREFIX: &str = "1022:";

/// Generic button endpoint that proxies the check-in API
pub const CHECK_IN_PATH: &str = "/p/aj/general/button";
pub const CHECK_IN_API: &str = "http://i.huati.weibo.com/aj/super/checkin";
pub const CHECK_IN_LOCATION: &str = "page_100808_super_index";

pub const DEFAULT_ERROR_MSG: &str = "未知错误";

/// Topic list envelope: `{ok, msg?, data: {list, max_page}}`
#[derive(Debug, Deserialize)]
pub(super) struct TopicEnvelope {
    #[serde(default)]
    pub ok: Value,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<TopicData>,
}

impl TopicEnvelope {
    pub fn is_ok(&self) -> bool {
        matches!(self.ok.as_i64(), Some(1)) || matches!(self.ok.as_bool(), Some(true))
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct TopicData {
    #[serde(default)]
    pub list: Vec<TopicItem>,
    #[serde(default = "default_max_page")]
    pub max_page: u32,
}

fn default_max_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub(super) struct TopicItem {
    #[serde(default)]
    pub oid: Option<String>,
    #[serde(default)]
    pub topic_name: Option<String>,
}

/// Check-in response: `{code: string|int, msg}`
#[derive(Debug, Deserialize)]
pub(super) struct CheckInEnvelope {
    #[serde(default)]
    pub code: Value,
    #[serde(default)]
    pub msg: Option<String>,
}

impl CheckInEnvelope {
    /// Response code rendered as a string; numbers and strings compare alike
    pub fn code_string(&self) -> String {
        match &self.code {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// First `max` characters of a body, for error messages
pub(super) fn snippet(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
