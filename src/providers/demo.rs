//! Demo report store
//!
//! Static fallback reports used when no registry is configured. Records
//! are kept in their raw shape and normalized on read, like chain tuples.

use crate::core::normalizer::{normalize_report, RawFlag, RawReason, RawReport, RawTime};
use crate::models::types::Report;

const MINUTE_MS: i64 = 60 * 1000;

/// One stored record with its source-scoped id
#[derive(Debug, Clone)]
pub struct DemoRecord {
    pub id: u64,
    pub raw: RawReport,
}

#[derive(Debug, Clone, Default)]
pub struct DemoReportStore {
    records: Vec<DemoRecord>,
}

impl DemoReportStore {
    pub fn new(records: Vec<DemoRecord>) -> Self {
        Self { records }
    }

    /// Built-in sample set, timestamped relative to `now_ms`
    pub fn seeded(now_ms: i64) -> Self {
        let record = |id: u64,
                      reporter: &str,
                      target: &str,
                      tag: Option<&str>,
                      reason: &str,
                      evidence: &str,
                      age_minutes: i64,
                      upvotes: u64,
                      downvotes: u64| DemoRecord {
            id,
            raw: RawReport {
                reporter: Some(reporter.to_string()),
                target_address: Some(target.to_string()),
                name_tag: tag.map(str::to_string),
                reason: RawReason::Label(reason.to_string()),
                evidence: Some(evidence.to_string()),
                timestamp: RawTime::Millis(now_ms - age_minutes * MINUTE_MS),
                upvotes,
                downvotes,
                resolved: RawFlag::Bool(false),
                malicious: RawFlag::Bool(false),
                resolved_at: RawTime::Millis(0),
                ..Default::default()
            },
        };

        Self::new(vec![
            record(
                2,
                "0x6B175474E89094C44Da98b954EedeAC495271d0F",
                "0x111111111117dC0aa78b770fA6A738034120C302",
                Some("router-honeypot"),
                "Phishing",
                "Users reported cloned swap interface redirecting approvals.",
                30,
                8,
                1,
            ),
            record(
                1,
                "0x742d35Cc6634C0532925a3b844Bc454e4438f44e",
                "0x22222222222A7f2f2D0efA7D2A6fD6b88E59f6a9",
                Some("fake-airdrop"),
                "Scam",
                "Airdrop page asks for approval then drains token balances.",
                90,
                5,
                0,
            ),
            record(
                0,
                "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
                "0x33333333333b3f5A6b8Afb5f76D2f21C90eCeA31",
                None,
                "Spam",
                "Repeated dust transactions tied to fake support inbox links.",
                180,
                2,
                3,
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every report, normalized, in storage order
    pub fn all(&self) -> Vec<Report> {
        self.records
            .iter()
            .map(|record| normalize_report(record.id, &record.raw))
            .collect()
    }

    pub fn by_id(&self, id: u64) -> Option<Report> {
        self.records
            .iter()
            .find(|record| record.id == id)
            .map(|record| normalize_report(record.id, &record.raw))
    }

    /// Reports whose target matches `address`, case-insensitively
    pub fn for_target(&self, address: &str) -> Vec<Report> {
        let address = address.trim();
        self.all()
            .into_iter()
            .filter(|report| report.target_address.eq_ignore_ascii_case(address))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::ReportReason;

    #[test]
    fn test_seeded_set() {
        let store = DemoReportStore::seeded(1_000_000_000);
        assert_eq!(store.len(), 3);

        let report = store.by_id(2).unwrap();
        assert_eq!(report.reason, ReportReason::Phishing);
        assert_eq!(report.timestamp, 1_000_000_000 - 30 * MINUTE_MS);
        assert_eq!(report.resolved_by, crate::utils::constants::ZERO_ADDRESS);
        assert!(store.by_id(9).is_none());
    }

    #[test]
    fn test_target_match_is_case_insensitive() {
        let store = DemoReportStore::seeded(0);
        let reports = store.for_target("0x22222222222a7f2f2d0efa7d2a6fd6b88e59f6a9");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, 1);
        assert!(store.for_target("0x0000000000000000000000000000000000000001").is_empty());
    }
}
