use serde::{Deserialize, Serialize};

use super::{CheckInError, LogEntry};

/// Response codes the check-in endpoint reports on success
pub const SUCCESS_CODES: [&str; 3] = ["100000", "382004", "382010"];

/// Success code meaning the topic was already checked in today
pub const ALREADY_CHECKED_IN_CODE: &str = "382004";

/// A followed topic (超话) the account can check in to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
}

impl Topic {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One page of the followed-topic list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPage {
    /// Topics recognised on this page, in server order
    pub topics: Vec<Topic>,
    /// Number of raw items the server returned, recognised or not
    pub item_count: usize,
    /// Last page number reported by the server
    pub max_page: u32,
}

/// Result of a single check-in request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinOutcome {
    pub succeeded: bool,
    pub code: String,
    pub message: String,
    pub already_done: bool,
}

impl CheckinOutcome {
    /// Classify a response code; only [`SUCCESS_CODES`] count as success
    ///
    /// Any other code is an [`CheckInError::Action`] failure and its message
    /// carries that classification.
    pub fn from_response(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        let succeeded = SUCCESS_CODES.contains(&code.as_str());
        let already_done = code == ALREADY_CHECKED_IN_CODE;
        let message = if succeeded {
            message.into()
        } else {
            CheckInError::Action(message.into()).to_string()
        };

        Self {
            succeeded,
            code,
            message,
            already_done,
        }
    }

    pub fn from_error(error: &CheckInError) -> Self {
        Self {
            succeeded: false,
            code: String::new(),
            message: error.to_string(),
            already_done: false,
        }
    }
}

/// Per-account aggregate of one run
///
/// For a completed run `success_count + already_signed_count + fail_count == total`.
/// A run aborted during discovery reports all counts as zero and `success == false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub success: bool,
    pub total: usize,
    pub success_count: usize,
    pub already_signed_count: usize,
    pub fail_count: usize,
    pub logs: Vec<LogEntry>,
}

impl RunSummary {
    pub fn aborted(logs: Vec<LogEntry>) -> Self {
        Self {
            success: false,
            total: 0,
            success_count: 0,
            already_signed_count: 0,
            fail_count: 0,
            logs,
        }
    }

    pub fn completed(
        success_count: usize,
        already_signed_count: usize,
        fail_count: usize,
        logs: Vec<LogEntry>,
    ) -> Self {
        Self {
            success: true,
            total: success_count + already_signed_count + fail_count,
            success_count,
            already_signed_count,
            fail_count,
            logs,
        }
    }

    pub fn is_consistent(&self) -> bool {
        let counted = self.success_count + self.already_signed_count + self.fail_count;
        if self.success {
            counted == self.total
        } else {
            self.total == 0 && counted == 0
        }
    }
}

/// One entry of a batch run, in credential-list order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRunResult {
    /// 1-based position of the credential in the batch
    pub account_index: usize,
    pub user_info: String,
    pub result: RunSummary,
}
