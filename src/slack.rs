use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use tracing::error;

use crate::report::ExpiryReport;
use crate::types::{CertRecord, Config, SlackAttachment, SlackField, SlackPayload};

pub const ALERT_TITLE: &str = "TLS/SSL cert expiration alert.";
pub const ALERT_COLOR: &str = "danger";

pub fn build_alert_attachment(record: &CertRecord, checked_at: DateTime<Utc>) -> SlackAttachment {
    SlackAttachment {
        title: ALERT_TITLE.to_string(),
        color: ALERT_COLOR.to_string(),
        fields: vec![
            SlackField {
                title: "TLS Host".to_string(),
                value: record.host.clone(),
                short: true,
            },
            SlackField {
                title: "Days left".to_string(),
                value: record.days_left.to_string(),
                short: true,
            },
        ],
        ts: Some(checked_at.timestamp()),
    }
}

/// Returns `None` when nothing is in alert state, so no message goes out.
pub fn build_slack_payload(cfg: &Config, report: &ExpiryReport) -> Option<SlackPayload> {
    let attachments: Vec<SlackAttachment> = report
        .alerts()
        .into_iter()
        .map(|r| build_alert_attachment(r, report.checked_at))
        .collect();
    if attachments.is_empty() {
        return None;
    }

    let text = format!(
        "{} *Following TLS/SSL host(s) is/are in ALERT state ({} hosts checked):*",
        cfg.slack_mention,
        report.checked_count()
    );
    Some(SlackPayload { text, attachments })
}

pub async fn send_to_slack(webhook_url: &str, payload: &SlackPayload) -> Result<()> {
    let client = reqwest::Client::new();
    let res = client
        .post(webhook_url)
        .json(payload)
        .send()
        .await
        .context("Failed to send Slack request")?;
    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        error!("Slack webhook failed: {} - {}", status, body);
        return Err(anyhow!("Slack webhook returned non-success status {}", status));
    }
    Ok(())
}
