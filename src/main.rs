use anyhow::Result;
use tracing::info;

use tls_expiry_notifier::{ensure_hosts_file, load_config, run};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cfg = load_config()?;
    info!(
        "threshold = {} days, mention = {}, hosts file = {}",
        cfg.alert_threshold_days,
        cfg.slack_mention,
        cfg.hosts_file.display()
    );

    // Fail fast before spawning anything
    ensure_hosts_file(&cfg.hosts_file)?;

    let summary = run(&cfg).await?;
    info!(
        "Run complete: {} checked, {} in alert state",
        summary.checked_count, summary.alert_count
    );

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
