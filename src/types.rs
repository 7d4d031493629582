use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub slack_webhook_url: String,
    pub alert_threshold_days: i64,
    pub slack_mention: String,
    pub statsd_addr: Option<String>,
    pub checker_command: String,
    pub hosts_file: PathBuf,
    pub check_timeout: Duration,
}

/// One row of checker output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertRecord {
    pub host: String,
    pub common_name: String,
    pub valid: bool,
    pub days_left: i64,
    pub expire_date: String,
}

impl CertRecord {
    pub fn has_alert_state(&self, threshold_days: i64) -> bool {
        self.days_left <= threshold_days
    }

    pub fn is_expired(&self) -> bool {
        self.days_left < 0
    }
}

#[derive(Debug, Serialize)]
pub struct SlackPayload {
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<SlackAttachment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlackAttachment {
    pub title: String,
    pub color: String,
    pub fields: Vec<SlackField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlackField {
    pub title: String,
    pub value: String,
    pub short: bool,
}
