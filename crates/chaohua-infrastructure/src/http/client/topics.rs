use log::debug;
use reqwest::{header, StatusCode};

use chaohua_domain::check_in::{CheckInError, Topic, TopicPage};

use super::types::{
    snippet, TopicEnvelope, DEFAULT_ERROR_MSG, TOPIC_LIST_PATH, TOPIC_OID_PREFIX, TOPIC_TAB_ID,
};

impl super::WeiboHttpClient {
    /// GET one page of the followed-topic list
    pub(super) async fn request_topic_page(&self, page: u32) -> Result<TopicPage, CheckInError> {
        let response = self
            .client
            .get(self.url(TOPIC_LIST_PATH))
            .query(&[("tabid", TOPIC_TAB_ID.to_string()), ("page", page.to_string())])
            .header(header::REFERER, format!("{}/", self.base_url))
            .header("x-requested-with", "XMLHttpRequest")
            .send()
            .await
            .map_err(|e| CheckInError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckInError::Network(e.to_string()))?;

        debug!("Topic list page {} response status: {}", page, status);

        parse_topic_page(status, &body)
    }
}

/// Parse a topic-list response into a page of recognised topics
///
/// Items whose `oid` lacks the `1022:` prefix, or that have an empty id or name, are
/// skipped but still counted in `item_count`.
pub fn parse_topic_page(status: StatusCode, body: &str) -> Result<TopicPage, CheckInError> {
    if status != StatusCode::OK {
        return Err(CheckInError::Network(format!(
            "HTTP Error: {}",
            status.as_u16()
        )));
    }
    if body.trim().is_empty() {
        return Err(CheckInError::Network("响应内容为空".to_string()));
    }

    let envelope: TopicEnvelope = serde_json::from_str(body).map_err(|e| {
        CheckInError::Parse(format!("{}，响应内容: {}...", e, snippet(body, 200)))
    })?;

    if !envelope.is_ok() {
        let msg = envelope.msg.as_deref().unwrap_or(DEFAULT_ERROR_MSG);
        return Err(CheckInError::from_envelope_message(msg));
    }

    let data = envelope.data.unwrap_or_default();
    let topics = data
        .list
        .iter()
        .filter_map(|item| {
            let id = item.oid.as_deref()?.strip_prefix(TOPIC_OID_PREFIX)?;
            let name = item.topic_name.as_deref()?;
            if id.is_empty() || name.is_empty() {
                return None;
            }
            Some(Topic::new(id, name))
        })
        .collect();

    Ok(TopicPage {
        topics,
        item_count: data.list.len(),
        max_page: data.max_page,
    })
}
