use chrono::Utc;
use log::{debug, warn};
use reqwest::{header, StatusCode};

use chaohua_domain::check_in::{CheckInError, CheckinOutcome, Topic};

use super::types::{
    CheckInEnvelope, CHECK_IN_API, CHECK_IN_LOCATION, CHECK_IN_PATH, DEFAULT_ERROR_MSG,
};

impl super::WeiboHttpClient {
    /// Check in to one topic, folding every failure into the outcome
    pub(super) async fn request_check_in(&self, topic: &Topic) -> CheckinOutcome {
        match self.try_check_in(topic).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Check-in request for topic {} failed: {}", topic.id, e);
                CheckinOutcome::from_error(&e)
            }
        }
    }

    async fn try_check_in(&self, topic: &Topic) -> Result<CheckinOutcome, CheckInError> {
        let nonce = Utc::now().timestamp_millis();

        let response = self
            .client
            .get(self.url(CHECK_IN_PATH))
            .query(&[
                ("api", CHECK_IN_API.to_string()),
                ("id", topic.id.clone()),
                ("location", CHECK_IN_LOCATION.to_string()),
                ("__rnd", nonce.to_string()),
            ])
            .header(
                header::REFERER,
                format!("{}/p/{}/super_index", self.base_url, topic.id),
            )
            .header("x-requested-with", "XMLHttpRequest")
            .send()
            .await
            .map_err(|e| CheckInError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CheckInError::Network(format!(
                "HTTP错误: {}",
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CheckInError::Network(format!("读取响应失败: {}", e)))?;

        debug!("Check-in response for topic {}: {}", topic.id, body);

        parse_check_in_response(&body)
    }
}

/// Parse a check-in response body and classify its code
pub fn parse_check_in_response(body: &str) -> Result<CheckinOutcome, CheckInError> {
    let envelope: CheckInEnvelope =
        serde_json::from_str(body).map_err(|e| CheckInError::Parse(e.to_string()))?;

    let msg = envelope
        .msg
        .clone()
        .unwrap_or_else(|| DEFAULT_ERROR_MSG.to_string());

    Ok(CheckinOutcome::from_response(envelope.code_string(), msg))
}
