use anyhow::{Context, Result};
use tracing::{error, info};

use crate::collector::CertCollector;
use crate::metrics::record_run;
use crate::report::{ExpiryReport, ReportSummary};
use crate::slack::{build_slack_payload, send_to_slack};
use crate::types::Config;

/// One full check-and-notify pass.
///
/// Malformed checker output aborts before anything is sent. A failed Slack
/// post is returned as an error after the run metric has been emitted.
pub async fn run(cfg: &Config) -> Result<ReportSummary> {
    let records = CertCollector::from_config(cfg)
        .collect()
        .await
        .context("Failed to parse checker output")?;

    let report = ExpiryReport::new(records, cfg.alert_threshold_days);
    let summary = report.summary();
    info!(
        "{} host(s) checked, {} invalid, {} expired",
        summary.checked_count, summary.invalid_count, summary.expired_count
    );

    info!("TLS hosts in ALERT state (days left <= {}):", report.threshold_days);
    for r in report.alerts() {
        info!(
            "Host '{}' is in ALERT state, only {} days left before TLS cert expires ({})",
            r.host, r.days_left, r.expire_date
        );
    }

    let notified = match build_slack_payload(cfg, &report) {
        Some(payload) => {
            info!("Sending {} alert(s) to Slack", payload.attachments.len());
            send_to_slack(&cfg.slack_webhook_url, &payload).await
        }
        None => {
            info!("No hosts in ALERT state, skipping Slack notification");
            Ok(())
        }
    };

    record_run(cfg.statsd_addr.as_deref()).await;

    match notified {
        Ok(()) => {
            if summary.has_alerts() {
                info!("Successfully sent message to Slack incoming webhook");
            }
            Ok(summary)
        }
        Err(e) => {
            error!("Error sending message to Slack incoming webhook: {:#}", e);
            Err(e)
        }
    }
}
