use chrono::{DateTime, Utc};

use crate::types::CertRecord;

/// Certificate records of one run, evaluated against the alert threshold
pub struct ExpiryReport {
    pub threshold_days: i64,
    pub records: Vec<CertRecord>,
    pub checked_at: DateTime<Utc>,
}

impl ExpiryReport {
    pub fn new(records: Vec<CertRecord>, threshold_days: i64) -> Self {
        Self::with_time(records, threshold_days, Utc::now())
    }

    pub fn with_time(records: Vec<CertRecord>, threshold_days: i64, checked_at: DateTime<Utc>) -> Self {
        Self {
            threshold_days,
            records,
            checked_at,
        }
    }

    /// Records whose remaining validity is at or below the threshold, in checker order
    pub fn alerts(&self) -> Vec<&CertRecord> {
        self.records
            .iter()
            .filter(|r| r.has_alert_state(self.threshold_days))
            .collect()
    }

    pub fn has_alerts(&self) -> bool {
        self.records.iter().any(|r| r.has_alert_state(self.threshold_days))
    }

    pub fn checked_count(&self) -> usize {
        self.records.len()
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            checked_count: self.records.len(),
            alert_count: self.alerts().len(),
            invalid_count: self.records.iter().filter(|r| !r.valid).count(),
            expired_count: self.records.iter().filter(|r| r.is_expired()).count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub checked_count: usize,
    pub alert_count: usize,
    pub invalid_count: usize,
    pub expired_count: usize,
}

impl ReportSummary {
    pub fn has_alerts(&self) -> bool {
        self.alert_count > 0
    }
}
