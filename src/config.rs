use crate::error::{ReminderError, Result};
use crate::util::parse_utc_offset;
use chrono::FixedOffset;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:reminders.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub poll_interval: Duration,
    /// The one zone both insert validation and due comparison use.
    pub utc_offset: FixedOffset,
    pub app_version: String,
    pub environment: String,
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(ReminderError::Config(format!(".env: {err}")));
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let poll_secs = var("POLL_INTERVAL_SECS", &DEFAULT_POLL_INTERVAL_SECS.to_string());
        let poll_secs: u64 = poll_secs
            .parse()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| ReminderError::Config(format!("invalid POLL_INTERVAL_SECS `{poll_secs}`")))?;

        Ok(Config {
            database_url: var("DATABASE_URL", DEFAULT_DATABASE_URL),
            bind_addr: var("BIND_ADDR", DEFAULT_BIND_ADDR),
            poll_interval: Duration::from_secs(poll_secs),
            utc_offset: parse_utc_offset(&var("REMINDER_UTC_OFFSET", "+00:00"))?,
            app_version: var("APP_VERSION", "1.0"),
            environment: var("ENVIRONMENT", "development"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.utc_offset.local_minus_utc(), 0);
        assert_eq!(config.app_version, "1.0");
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("DATABASE_URL", "sqlite:/tmp/r.db"),
            ("POLL_INTERVAL_SECS", "15"),
            ("REMINDER_UTC_OFFSET", "+05:30"),
            ("ENVIRONMENT", "production"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite:/tmp/r.db");
        assert_eq!(config.poll_interval, Duration::from_secs(15));
        assert_eq!(config.utc_offset.local_minus_utc(), 5 * 3600 + 30 * 60);
        assert_eq!(config.environment, "production");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(config(&[("POLL_INTERVAL_SECS", "0")]), Err(ReminderError::Config(_))));
        assert!(matches!(config(&[("POLL_INTERVAL_SECS", "soon")]), Err(ReminderError::Config(_))));
        assert!(matches!(config(&[("REMINDER_UTC_OFFSET", "CET")]), Err(ReminderError::Config(_))));
    }
}
