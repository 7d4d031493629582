use tracing::{error, info};

use crate::checker::Checker;
use crate::parsing::{parse_checker_output, ParseError};
use crate::types::{CertRecord, Config};

/// Runs the checker once and turns its output into records
pub struct CertCollector {
    checker: Checker,
}

impl CertCollector {
    pub fn new(checker: Checker) -> Self {
        Self { checker }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Checker::from_config(config))
    }

    /// A failed or timed-out checker run yields no records; malformed output
    /// is an error.
    pub async fn collect(&self) -> Result<Vec<CertRecord>, ParseError> {
        let raw = match self.checker.run().await {
            Ok(out) => out,
            Err(e) => {
                error!("Error while checking TLS hosts: {}", e);
                String::new()
            }
        };

        let records = parse_checker_output(&raw)?;
        info!("Parsed {} certificate record(s) from checker output", records.len());
        Ok(records)
    }
}
