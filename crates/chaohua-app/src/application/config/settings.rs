use chrono::NaiveTime;
use std::path::PathBuf;
use std::time::Duration;

use chaohua_infrastructure::config::{HttpConfig, PacingConfig};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

const APP_DIR_NAME: &str = "chaohua-checkin";

/// Process-wide settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub bind_address: String,
    pub port: u16,
    /// Credential store file
    pub config_file: PathBuf,
    pub log_dir: PathBuf,
    pub http: HttpConfig,
    pub pacing: PacingConfig,
    /// Daily local time for the automatic batch, disabled when `None`
    pub auto_run_at: Option<NaiveTime>,
    /// Environment values that were present but could not be used
    pub warnings: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            log_dir: default_log_dir(),
            http: HttpConfig::default(),
            pacing: PacingConfig::default(),
            auto_run_at: None,
            warnings: Vec::new(),
        }
    }
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

impl AppSettings {
    /// Load settings from environment variables, falling back to defaults.
    ///
    /// Supported env vars:
    /// - `CHAOHUA_BIND_ADDRESS` (e.g. "127.0.0.1")
    /// - `CHAOHUA_PORT` (e.g. "5000")
    /// - `CHAOHUA_CONFIG_FILE` (path of the cookie store)
    /// - `CHAOHUA_LOG_DIR`
    /// - `CHAOHUA_BASE_URL` (upstream scheme and host)
    /// - `CHAOHUA_AUTO_RUN_AT` (daily run time, "HH:MM")
    /// - `CHAOHUA_PAGE_INTERVAL_MS`, `CHAOHUA_SIGN_INTERVAL_MS`, `CHAOHUA_ACCOUNT_INTERVAL_MS`
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env_or_default`] with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(bind_address) = value("CHAOHUA_BIND_ADDRESS") {
            settings.bind_address = bind_address;
        }

        if let Some(port) = value("CHAOHUA_PORT") {
            match port.parse::<u16>() {
                Ok(parsed) => settings.port = parsed,
                Err(_) => settings.reject("CHAOHUA_PORT", &port),
            }
        }

        if let Some(path) = value("CHAOHUA_CONFIG_FILE") {
            settings.config_file = PathBuf::from(path);
        }

        if let Some(path) = value("CHAOHUA_LOG_DIR") {
            settings.log_dir = PathBuf::from(path);
        }

        if let Some(base_url) = value("CHAOHUA_BASE_URL") {
            if base_url.starts_with("http://") || base_url.starts_with("https://") {
                settings.http.base_url = base_url.trim_end_matches('/').to_string();
            } else {
                settings.reject("CHAOHUA_BASE_URL", &base_url);
            }
        }

        if let Some(at) = value("CHAOHUA_AUTO_RUN_AT") {
            match NaiveTime::parse_from_str(&at, "%H:%M") {
                Ok(time) => settings.auto_run_at = Some(time),
                Err(_) => settings.reject("CHAOHUA_AUTO_RUN_AT", &at),
            }
        }

        if let Some(ms) = value("CHAOHUA_PAGE_INTERVAL_MS") {
            match parse_millis(&ms) {
                Some(interval) => settings.pacing.page_interval = interval,
                None => settings.reject("CHAOHUA_PAGE_INTERVAL_MS", &ms),
            }
        }

        if let Some(ms) = value("CHAOHUA_SIGN_INTERVAL_MS") {
            match parse_millis(&ms) {
                Some(interval) => settings.pacing.sign_interval = interval,
                None => settings.reject("CHAOHUA_SIGN_INTERVAL_MS", &ms),
            }
        }

        if let Some(ms) = value("CHAOHUA_ACCOUNT_INTERVAL_MS") {
            match parse_millis(&ms) {
                Some(interval) => settings.pacing.account_interval = interval,
                None => settings.reject("CHAOHUA_ACCOUNT_INTERVAL_MS", &ms),
            }
        }

        settings
    }

    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    fn reject(&mut self, key: &str, value: &str) {
        self.warnings
            .push(format!("Ignoring invalid {}={:?}, keeping default", key, value));
    }
}

fn parse_millis(value: &str) -> Option<Duration> {
    value.parse::<u64>().ok().map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> AppSettings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(&[]);

        assert_eq!(settings.bind_address, "0.0.0.0");
        assert_eq!(settings.port, 5000);
        assert_eq!(settings.config_file, PathBuf::from("config.json"));
        assert_eq!(settings.http, HttpConfig::default());
        assert_eq!(settings.pacing, PacingConfig::default());
        assert!(settings.auto_run_at.is_none());
        assert!(settings.warnings.is_empty());
        assert_eq!(settings.socket_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_overrides() {
        let settings = settings_from(&[
            ("CHAOHUA_BIND_ADDRESS", "127.0.0.1"),
            ("CHAOHUA_PORT", "8080"),
            ("CHAOHUA_CONFIG_FILE", "/data/cookies.json"),
            ("CHAOHUA_LOG_DIR", "/data/logs"),
            ("CHAOHUA_BASE_URL", "http://localhost:9000/"),
            ("CHAOHUA_AUTO_RUN_AT", "08:30"),
            ("CHAOHUA_PAGE_INTERVAL_MS", "0"),
            ("CHAOHUA_SIGN_INTERVAL_MS", "250"),
            ("CHAOHUA_ACCOUNT_INTERVAL_MS", "3000"),
        ]);

        assert_eq!(settings.socket_address(), "127.0.0.1:8080");
        assert_eq!(settings.config_file, PathBuf::from("/data/cookies.json"));
        assert_eq!(settings.log_dir, PathBuf::from("/data/logs"));
        assert_eq!(settings.http.base_url, "http://localhost:9000");
        assert_eq!(settings.auto_run_at, NaiveTime::from_hms_opt(8, 30, 0));
        assert_eq!(settings.pacing.page_interval, Duration::ZERO);
        assert_eq!(settings.pacing.sign_interval, Duration::from_millis(250));
        assert_eq!(settings.pacing.account_interval, Duration::from_secs(3));
        assert!(settings.warnings.is_empty());
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let settings = settings_from(&[
            ("CHAOHUA_PORT", "not-a-port"),
            ("CHAOHUA_BASE_URL", "weibo.com"),
            ("CHAOHUA_AUTO_RUN_AT", "25:99"),
            ("CHAOHUA_SIGN_INTERVAL_MS", "-1"),
        ]);

        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.http.base_url, HttpConfig::default().base_url);
        assert!(settings.auto_run_at.is_none());
        assert_eq!(
            settings.pacing.sign_interval,
            PacingConfig::default().sign_interval
        );
        assert_eq!(settings.warnings.len(), 4);
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let settings = settings_from(&[("CHAOHUA_BIND_ADDRESS", "   "), ("CHAOHUA_PORT", "")]);

        assert_eq!(settings.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(settings.port, DEFAULT_PORT);
        assert!(settings.warnings.is_empty());
    }
}
