/// Failures while talking to the upstream API
///
/// Discovery errors propagate out of topic pagination and end the account's run.
/// Check-in errors never propagate; they are folded into a failed
/// [`super::CheckinOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckInError {
    /// Connection failure, timeout, non-200 status or empty body
    #[error("网络请求失败: {0}")]
    Network(String),

    /// Body is not the expected JSON
    #[error("响应格式错误: {0}")]
    Parse(String),

    /// Envelope reports an expired or invalid session
    #[error("登录状态失效，请更新Cookie: {0}")]
    Auth(String),

    /// Any other non-ok envelope
    #[error("API返回错误: {0}")]
    Api(String),

    /// Check-in request failed after the exchange started
    #[error("签到失败: {0}")]
    Action(String),
}

impl CheckInError {
    /// Stable classification name used in run logs
    pub fn kind(&self) -> &'static str {
        match self {
            CheckInError::Network(_) => "NetworkError",
            CheckInError::Parse(_) => "ParseError",
            CheckInError::Auth(_) => "AuthError",
            CheckInError::Api(_) => "ApiError",
            CheckInError::Action(_) => "ActionError",
        }
    }

    /// Classify a non-ok discovery envelope by its message
    pub fn from_envelope_message(msg: &str) -> Self {
        let lowered = msg.to_lowercase();
        if lowered.contains("login") || lowered.contains("cookie") {
            CheckInError::Auth(msg.to_string())
        } else {
            CheckInError::Api(msg.to_string())
        }
    }
}
