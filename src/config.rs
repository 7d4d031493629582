use anyhow::{anyhow, bail, Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use crate::types::Config;

pub const DEFAULT_SLACK_MENTION: &str = "<!group>";
pub const DEFAULT_CHECKER_COMMAND: &str = "/usr/local/bin/sslcheck";
pub const DEFAULT_HOSTS_FILE: &str = "/etc/tls-expiry-notifier/hosts_to_check";
pub const DEFAULT_CHECK_TIMEOUT_SECS: u64 = 30;
pub const MIN_CHECK_TIMEOUT_SECS: u64 = 30;
pub const MAX_CHECK_TIMEOUT_SECS: u64 = 180;

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Blank values count as unset.
fn non_blank<E: EnvironmentProvider>(env: &E, key: &str) -> Option<String> {
    env.get_var(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn load_config() -> Result<Config> {
    load_config_with_env(&SystemEnvironment)
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config> {
    let slack_webhook_url = non_blank(env, "SLACK_INCOMING_WEBHOOK_URL")
        .ok_or_else(|| anyhow!("SLACK_INCOMING_WEBHOOK_URL env var must be set and not empty"))?;

    let threshold_raw = non_blank(env, "ALERT_THRESHOLD_DAYS")
        .ok_or_else(|| anyhow!("ALERT_THRESHOLD_DAYS env var must be set"))?;
    let alert_threshold_days: i64 = threshold_raw
        .parse()
        .with_context(|| format!("Invalid ALERT_THRESHOLD_DAYS '{}'", threshold_raw))?;

    let slack_mention = non_blank(env, "SLACK_MENTION")
        .unwrap_or_else(|| DEFAULT_SLACK_MENTION.to_string());

    let statsd_addr = non_blank(env, "STATSD_ADDR");

    let checker_command = non_blank(env, "CHECKER_COMMAND")
        .unwrap_or_else(|| DEFAULT_CHECKER_COMMAND.to_string());

    let hosts_file = non_blank(env, "TLS_HOSTS_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HOSTS_FILE));

    let timeout_secs: u64 = match non_blank(env, "CHECK_TIMEOUT_SECS") {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("Invalid CHECK_TIMEOUT_SECS '{}'", raw))?,
        None => DEFAULT_CHECK_TIMEOUT_SECS,
    };
    if !(MIN_CHECK_TIMEOUT_SECS..=MAX_CHECK_TIMEOUT_SECS).contains(&timeout_secs) {
        bail!(
            "CHECK_TIMEOUT_SECS must be between {} and {}, got {}",
            MIN_CHECK_TIMEOUT_SECS,
            MAX_CHECK_TIMEOUT_SECS,
            timeout_secs
        );
    }

    Ok(Config {
        slack_webhook_url,
        alert_threshold_days,
        slack_mention,
        statsd_addr,
        checker_command,
        hosts_file,
        check_timeout: Duration::from_secs(timeout_secs),
    })
}
