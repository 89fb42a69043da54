use chrono::Local;
use serde::{Deserialize, Serialize};

/// Severity of a run log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn symbol(&self) -> &'static str {
        match self {
            LogLevel::Info => "ℹ️",
            LogLevel::Success => "✅",
            LogLevel::Warning => "⚠️",
            LogLevel::Error => "❌",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Success => "SUCCESS",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// One rendered line of a run log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Local wall-clock time, `HH:MM:SS`
    pub time: String,
    pub level: LogLevel,
    /// Fully rendered line: `[time] symbol [账户N] text`
    pub message: String,
}

/// Append-only log of one account's run
#[derive(Debug, Clone, Default)]
pub struct RunLog {
    account_prefix: String,
    entries: Vec<LogEntry>,
}

impl RunLog {
    /// The `[账户N] ` prefix is only used when the batch has more than one account.
    pub fn new(account_index: usize, total_accounts: usize) -> Self {
        let account_prefix = if total_accounts > 1 {
            format!("[账户{}] ", account_index)
        } else {
            String::new()
        };

        Self {
            account_prefix,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, level: LogLevel, text: &str) -> &LogEntry {
        let time = Local::now().format("%H:%M:%S").to_string();
        self.push_at(time, level, text)
    }

    pub fn push_at(&mut self, time: String, level: LogLevel, text: &str) -> &LogEntry {
        let message = format!(
            "[{}] {} {}{}",
            time,
            level.symbol(),
            self.account_prefix,
            text
        );
        self.entries.push(LogEntry {
            time,
            level,
            message,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}
