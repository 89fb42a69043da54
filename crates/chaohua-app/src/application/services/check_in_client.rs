use std::sync::Arc;
use tracing::{error, info, warn};

use chaohua_domain::check_in::{
    ChaohuaApi, CheckInError, CheckinOutcome, LogEntry, LogLevel, RunLog, RunSummary, Topic,
};
use chaohua_domain::credential::Credential;
use chaohua_infrastructure::config::PacingConfig;

/// Drives one credential through topic discovery and check-in
///
/// Everything the run does is recorded in a per-account [`RunLog`] and mirrored to
/// `tracing`. Only a discovery failure ends the run early; per-topic failures are
/// counted and the loop moves on.
pub struct CheckInClient {
    credential: Credential,
    account_index: usize,
    api: Arc<dyn ChaohuaApi>,
    pacing: PacingConfig,
    log: RunLog,
}

impl CheckInClient {
    pub fn new(
        credential: Credential,
        account_index: usize,
        total_accounts: usize,
        pacing: PacingConfig,
        api: Arc<dyn ChaohuaApi>,
    ) -> Self {
        Self {
            credential,
            account_index,
            api,
            pacing,
            log: RunLog::new(account_index, total_accounts),
        }
    }

    pub fn user_hint(&self) -> String {
        self.credential.user_hint()
    }

    pub fn logs(&self) -> &[LogEntry] {
        self.log.entries()
    }

    fn log(&mut self, level: LogLevel, text: impl AsRef<str>) {
        let entry = self.log.push(level, text.as_ref());
        let account_index = self.account_index;
        match level {
            LogLevel::Error => error!(account_index, "{}", entry.message),
            LogLevel::Warning => warn!(account_index, "{}", entry.message),
            LogLevel::Info | LogLevel::Success => info!(account_index, "{}", entry.message),
        }
    }

    /// Collect every followed topic, page by page, in server order
    ///
    /// Stops after the server-reported `max_page`, on a page with no items, or at the
    /// configured page guard.
    pub async fn fetch_topic_list(&mut self) -> Result<Vec<Topic>, CheckInError> {
        let mut collected = Vec::new();
        let mut page = 1u32;

        loop {
            self.log(LogLevel::Info, format!("正在获取第 {} 页超话列表...", page));

            let topic_page = self.api.fetch_topic_page(page).await?;
            if topic_page.item_count == 0 {
                break;
            }
            collected.extend(topic_page.topics);

            if page >= topic_page.max_page {
                break;
            }
            if page >= self.pacing.max_topic_pages {
                self.log(
                    LogLevel::Warning,
                    format!(
                        "超话列表页数超过上限 {}，停止翻页（服务器报告 {} 页）",
                        self.pacing.max_topic_pages, topic_page.max_page
                    ),
                );
                break;
            }

            tokio::time::sleep(self.pacing.page_interval).await;
            page += 1;
        }

        Ok(collected)
    }

    /// Check in to a single topic; failures come back as a non-success outcome
    pub async fn check_in(&self, topic: &Topic) -> CheckinOutcome {
        self.api.check_in(topic).await
    }

    pub async fn run(&mut self) -> RunSummary {
        let user_hint = self.credential.user_hint();
        self.log(
            LogLevel::Info,
            format!("🚀 开始执行签到任务 ({})", user_hint),
        );

        if self.credential.xsrf_token().is_none() {
            self.log(LogLevel::Warning, "未找到XSRF-TOKEN，可能影响签到功能");
        }

        self.log(LogLevel::Info, "📋 正在获取超话列表...");
        let topics = match self.fetch_topic_list().await {
            Ok(topics) => topics,
            Err(e) => {
                self.log(
                    LogLevel::Error,
                    format!("签到任务执行失败 [{}]: {}", e.kind(), e),
                );
                return RunSummary::aborted(self.log.entries().to_vec());
            }
        };

        if topics.is_empty() {
            self.log(
                LogLevel::Warning,
                "未获取到超话列表，请检查Cookie是否有效",
            );
            return RunSummary::aborted(self.log.entries().to_vec());
        }

        let total = topics.len();
        self.log(LogLevel::Info, format!("📊 成功获取到 {} 个超话", total));

        let mut success_count = 0;
        let mut already_signed_count = 0;
        let mut fail_count = 0;

        for (i, topic) in topics.iter().enumerate() {
            self.log(
                LogLevel::Info,
                format!("📝 正在签到 ({}/{}): {}", i + 1, total, topic.name),
            );

            let outcome = self.check_in(topic).await;
            if outcome.succeeded && outcome.already_done {
                self.log(
                    LogLevel::Warning,
                    format!("[{}] {}", topic.name, outcome.message),
                );
                already_signed_count += 1;
            } else if outcome.succeeded {
                self.log(
                    LogLevel::Success,
                    format!("[{}] {}", topic.name, outcome.message),
                );
                success_count += 1;
            } else {
                self.log(
                    LogLevel::Error,
                    format!("[{}] {}", topic.name, outcome.message),
                );
                fail_count += 1;
            }

            tokio::time::sleep(self.pacing.sign_interval).await;
        }

        self.log(
            LogLevel::Info,
            format!(
                "📈 签到完成！总计 {} 个超话，成功 {} 个，已签到 {} 个，失败 {} 个",
                total, success_count, already_signed_count, fail_count
            ),
        );

        RunSummary::completed(
            success_count,
            already_signed_count,
            fail_count,
            self.log.entries().to_vec(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{topic_page, ScriptedApi};
    use chaohua_domain::check_in::TopicPage;

    const COOKIE: &str = "SUB=_2A25Kx1YdeRhGe; XSRF-TOKEN=tok";

    fn client_with(api: Arc<ScriptedApi>, cookie: &str) -> CheckInClient {
        CheckInClient::new(
            Credential::new(cookie),
            1,
            1,
            PacingConfig::immediate(),
            api,
        )
    }

    #[tokio::test]
    async fn test_single_page_all_succeed() {
        let api = Arc::new(
            ScriptedApi::new().with_page(1, Ok(topic_page(&[("a", "超话A"), ("b", "超话B")], 1))),
        );
        let mut client = client_with(api.clone(), COOKIE);

        let summary = client.run().await;

        assert!(summary.success);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.already_signed_count, 0);
        assert_eq!(summary.fail_count, 0);
        assert!(summary.is_consistent());
        assert_eq!(api.check_in_calls(), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_pagination_accumulates_in_page_order() {
        let api = Arc::new(
            ScriptedApi::new()
                .with_page(1, Ok(topic_page(&[("a", "A"), ("b", "B")], 3)))
                .with_page(2, Ok(topic_page(&[("c", "C")], 3)))
                .with_page(3, Ok(topic_page(&[("d", "D"), ("e", "E")], 3)))
                .with_page(4, Ok(topic_page(&[("never", "X")], 3))),
        );
        let mut client = client_with(api.clone(), COOKIE);

        let topics = client.fetch_topic_list().await.unwrap();

        let ids: Vec<&str> = topics.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(api.page_calls(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_pagination_stops_on_empty_page() {
        let api = Arc::new(
            ScriptedApi::new()
                .with_page(1, Ok(topic_page(&[("a", "A")], 5)))
                .with_page(2, Ok(topic_page(&[], 5))),
        );
        let mut client = client_with(api.clone(), COOKIE);

        let topics = client.fetch_topic_list().await.unwrap();

        assert_eq!(topics.len(), 1);
        assert_eq!(api.page_calls(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_page_with_only_unrecognised_items_continues() {
        let skipped_only = TopicPage {
            topics: vec![],
            item_count: 3,
            max_page: 2,
        };
        let api = Arc::new(
            ScriptedApi::new()
                .with_page(1, Ok(skipped_only))
                .with_page(2, Ok(topic_page(&[("z", "Z")], 2))),
        );
        let mut client = client_with(api.clone(), COOKIE);

        let topics = client.fetch_topic_list().await.unwrap();

        assert_eq!(topics, vec![Topic::new("z", "Z")]);
        assert_eq!(api.page_calls(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_pagination_guard_stops_misreported_max_page() {
        let mut api = ScriptedApi::new();
        for page in 1..=10 {
            api = api.with_page(page, Ok(topic_page(&[("t", "T")], u32::MAX)));
        }
        let api = Arc::new(api);
        let mut pacing = PacingConfig::immediate();
        pacing.max_topic_pages = 3;
        let mut client = CheckInClient::new(Credential::new(COOKIE), 1, 1, pacing, api.clone());

        let topics = client.fetch_topic_list().await.unwrap();

        assert_eq!(topics.len(), 3);
        assert_eq!(api.page_calls(), vec![1, 2, 3]);
        assert_eq!(client.logs().last().unwrap().level, LogLevel::Warning);
    }

    #[tokio::test]
    async fn test_auth_failure_aborts_with_zero_summary() {
        let api = Arc::new(
            ScriptedApi::new().with_page(1, Err(CheckInError::Auth("login required".into()))),
        );
        let mut client = client_with(api.clone(), COOKIE);

        let summary = client.run().await;

        assert!(!summary.success);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.success_count, 0);
        assert_eq!(summary.already_signed_count, 0);
        assert_eq!(summary.fail_count, 0);
        assert!(summary.is_consistent());
        assert!(summary
            .logs
            .iter()
            .any(|entry| entry.level == LogLevel::Error && entry.message.contains("[AuthError]")));
        assert!(api.check_in_calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_on_later_page_discards_earlier_pages() {
        let api = Arc::new(
            ScriptedApi::new()
                .with_page(1, Ok(topic_page(&[("a", "A")], 2)))
                .with_page(2, Err(CheckInError::Parse("bad json".into()))),
        );
        let mut client = client_with(api.clone(), COOKIE);

        let summary = client.run().await;

        assert!(!summary.success);
        assert_eq!(summary.total, 0);
        assert!(api.check_in_calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_topic_list_is_unsuccessful() {
        let api = Arc::new(ScriptedApi::new().with_page(1, Ok(topic_page(&[], 1))));
        let mut client = client_with(api, COOKIE);

        let summary = client.run().await;

        assert!(!summary.success);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.logs.last().unwrap().level, LogLevel::Warning);
    }

    #[tokio::test]
    async fn test_mixed_outcomes_are_counted_and_loop_continues() {
        let api = Arc::new(
            ScriptedApi::new()
                .with_page(
                    1,
                    Ok(topic_page(&[("ok", "好"), ("done", "已签"), ("bad", "坏"), ("ok2", "好2")], 1)),
                )
                .with_outcome("done", CheckinOutcome::from_response("382004", "今天已签到"))
                .with_outcome(
                    "bad",
                    CheckinOutcome::from_error(&CheckInError::Network("HTTP错误: 500".into())),
                ),
        );
        let mut client = client_with(api.clone(), COOKIE);

        let summary = client.run().await;

        assert!(summary.success);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.already_signed_count, 1);
        assert_eq!(summary.fail_count, 1);
        assert!(summary.is_consistent());
        assert_eq!(api.check_in_calls().len(), 4);

        let failed_line = summary
            .logs
            .iter()
            .find(|entry| entry.message.contains("[坏]"))
            .unwrap();
        assert_eq!(failed_line.level, LogLevel::Error);
    }

    #[tokio::test]
    async fn test_rejected_code_logs_action_failure() {
        let api = Arc::new(
            ScriptedApi::new()
                .with_page(1, Ok(topic_page(&[("x", "超话X")], 1)))
                .with_outcome("x", CheckinOutcome::from_response("382003", "超话不存在")),
        );
        let mut client = client_with(api, COOKIE);

        let summary = client.run().await;

        assert_eq!(summary.fail_count, 1);
        let line = summary
            .logs
            .iter()
            .find(|entry| entry.message.contains("[超话X]"))
            .unwrap();
        assert_eq!(line.level, LogLevel::Error);
        assert!(line.message.ends_with("[超话X] 签到失败: 超话不存在"));
    }

    #[tokio::test]
    async fn test_second_check_in_same_day_is_already_done() {
        let api = Arc::new(ScriptedApi::new());
        let client = client_with(api, COOKIE);
        let topic = Topic::new("t1", "超话");

        let first = client.check_in(&topic).await;
        let second = client.check_in(&topic).await;

        assert!(first.succeeded && !first.already_done);
        assert!(second.succeeded);
        assert!(second.already_done);
        assert_eq!(second.code, "382004");
    }

    #[tokio::test]
    async fn test_missing_xsrf_token_warns_but_continues() {
        let api = Arc::new(ScriptedApi::new().with_page(1, Ok(topic_page(&[("a", "A")], 1))));
        let mut client = client_with(api, "SUB=abc");

        let summary = client.run().await;

        assert!(summary.success);
        assert!(summary
            .logs
            .iter()
            .any(|entry| entry.level == LogLevel::Warning && entry.message.contains("XSRF-TOKEN")));
    }

    #[tokio::test]
    async fn test_first_log_line_carries_user_hint() {
        let api = Arc::new(ScriptedApi::new().with_page(1, Ok(topic_page(&[], 1))));
        let mut client = client_with(api, "XSRF-TOKEN=t");

        let summary = client.run().await;

        assert!(summary.logs[0].message.contains("未知用户"));
    }

    #[tokio::test]
    async fn test_log_prefix_for_multi_account_batch() {
        let api = Arc::new(ScriptedApi::new().with_page(1, Ok(topic_page(&[], 1))));
        let mut client = CheckInClient::new(
            Credential::new(COOKIE),
            2,
            3,
            PacingConfig::immediate(),
            api,
        );

        let summary = client.run().await;

        assert!(summary
            .logs
            .iter()
            .all(|entry| entry.message.contains("[账户2] ")));
    }
}
