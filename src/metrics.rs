use anyhow::{anyhow, Context, Result};
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{info, warn};

/// Counter bumped once per run as a liveness signal.
pub const RUN_COUNTER: &str = "tls_expiry_notifier.runs";

/// StatsD counter line, e.g. `name:1|c`.
pub fn format_counter(name: &str, value: i64) -> String {
    format!("{}:{}|c", name, value)
}

pub async fn increment_counter(addr: &str, name: &str) -> Result<()> {
    let target: SocketAddr = tokio::net::lookup_host(addr)
        .await
        .with_context(|| format!("Failed to resolve StatsD address '{}'", addr))?
        .next()
        .ok_or_else(|| anyhow!("StatsD address '{}' resolved to nothing", addr))?;

    let bind_addr = if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
    let socket = UdpSocket::bind(bind_addr)
        .await
        .context("Failed to bind UDP socket for StatsD")?;
    socket
        .send_to(format_counter(name, 1).as_bytes(), target)
        .await
        .with_context(|| format!("Failed to send StatsD datagram to {}", target))?;
    Ok(())
}

/// Emits the run heartbeat. Never fails the run.
pub async fn record_run(statsd_addr: Option<&str>) {
    let Some(addr) = statsd_addr else {
        warn!("STATSD_ADDR not set, skipping run metric");
        return;
    };
    match increment_counter(addr, RUN_COUNTER).await {
        Ok(()) => info!("Incremented {} at {}", RUN_COUNTER, addr),
        Err(e) => warn!("Could not send run metric: {:#}", e),
    }
}
