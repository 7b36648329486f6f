//! Process configuration, read once at startup from the environment.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use eventsite_auth::FileTokenStore;
use eventsite_client::ClientConfig;
use eventsite_observability::LogFormat;

pub const ENV_API_URL: &str = "EVENTSITE_API_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "EVENTSITE_HTTP_TIMEOUT_SECS";
pub const ENV_POLL_INTERVAL_MS: &str = "EVENTSITE_POLL_INTERVAL_MS";
pub const ENV_DATA_DIR: &str = "EVENTSITE_DATA_DIR";
pub const ENV_LOG_FORMAT: &str = "EVENTSITE_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub client: ClientConfig,
    /// How often the registration view refreshes the attendee count.
    pub poll_interval: Duration,
    /// Directory holding the persisted admin token; platform default if unset.
    pub data_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url =
            get(ENV_API_URL).unwrap_or_else(|| ClientConfig::DEFAULT_BASE_URL.to_string());
        let timeout = parse_positive(ENV_HTTP_TIMEOUT_SECS, get(ENV_HTTP_TIMEOUT_SECS))
            .map(Duration::from_secs)
            .unwrap_or(ClientConfig::DEFAULT_TIMEOUT);
        let poll_interval = parse_positive(ENV_POLL_INTERVAL_MS, get(ENV_POLL_INTERVAL_MS))
            .map(Duration::from_millis)
            .unwrap_or(Self::DEFAULT_POLL_INTERVAL);

        let log_format = match get(ENV_LOG_FORMAT) {
            None => LogFormat::default(),
            Some(raw) => LogFormat::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(key = ENV_LOG_FORMAT, value = %raw, "unknown log format, using json");
                LogFormat::default()
            }),
        };

        Self {
            client: ClientConfig::new(base_url).with_timeout(timeout),
            poll_interval,
            data_dir: get(ENV_DATA_DIR).map(PathBuf::from),
            log_format,
        }
    }

    /// Resolve only the log format, so logging can start before the rest of
    /// the configuration is read. An unknown value is reported later by
    /// [`from_lookup`](Self::from_lookup).
    pub fn log_format_from_env() -> LogFormat {
        Self::log_format_from_lookup(|key| std::env::var(key).ok())
    }

    pub fn log_format_from_lookup<F>(lookup: F) -> LogFormat
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(ENV_LOG_FORMAT)
            .as_deref()
            .and_then(LogFormat::parse)
            .unwrap_or_default()
    }

    /// Token store in the configured directory, or the platform data dir.
    pub fn token_store(&self) -> anyhow::Result<FileTokenStore> {
        match &self.data_dir {
            Some(dir) => Ok(FileTokenStore::new(dir)),
            None => FileTokenStore::default_location()
                .context("no data directory configured and none found for this platform"),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Parse a positive number; anything else is logged and treated as unset.
fn parse_positive(key: &str, raw: Option<String>) -> Option<u64> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            tracing::warn!(key, value = %raw, "invalid value, using default");
            None
        }
    }
}
