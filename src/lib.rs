// Public modules
pub mod types;
pub mod config;
pub mod checker;
pub mod parsing;
pub mod collector;
pub mod report;
pub mod slack;
pub mod metrics;
pub mod runner;

// Re-export commonly used items
pub use types::*;
pub use config::{load_config, load_config_with_env, EnvironmentProvider, SystemEnvironment, MockEnvironment};
pub use checker::{ensure_hosts_file, CheckError, Checker};
pub use parsing::{parse_checker_output, parse_record_line, status_to_bool, ParseError};
pub use collector::CertCollector;
pub use report::{ExpiryReport, ReportSummary};
pub use slack::{build_alert_attachment, build_slack_payload, send_to_slack};
pub use metrics::{format_counter, increment_counter, record_run, RUN_COUNTER};
pub use runner::run;
