//! Report Normalizer
//!
//! Both report sources hand over loosely shaped records: the registry
//! returns ABI tuples with second-precision timestamps and numeric reason
//! codes, the fallback store keeps labelled records in milliseconds.
//! [`normalize_report`] is the only place that turns either one into a
//! canonical [`Report`].

use crate::models::types::{Report, ReportReason};
use crate::utils::constants::ZERO_ADDRESS;

/// Reason as it arrives from a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawReason {
    Code(u64),
    Label(String),
}

impl Default for RawReason {
    fn default() -> Self {
        RawReason::Code(5)
    }
}

/// Timestamp with its source unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTime {
    Seconds(u64),
    Millis(i64),
}

impl Default for RawTime {
    fn default() -> Self {
        RawTime::Seconds(0)
    }
}

impl RawTime {
    pub fn as_millis(&self) -> i64 {
        match *self {
            RawTime::Seconds(secs) => i64::try_from(secs).unwrap_or(i64::MAX / 1000).saturating_mul(1000),
            RawTime::Millis(ms) => ms,
        }
    }
}

/// Boolean-like field (`true`, `1`, `"yes"`...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawFlag {
    Bool(bool),
    Number(u64),
    Text(String),
}

impl Default for RawFlag {
    fn default() -> Self {
        RawFlag::Bool(false)
    }
}

impl From<bool> for RawFlag {
    fn from(value: bool) -> Self {
        RawFlag::Bool(value)
    }
}

impl RawFlag {
    pub fn as_bool(&self) -> bool {
        match self {
            RawFlag::Bool(b) => *b,
            RawFlag::Number(n) => *n != 0,
            RawFlag::Text(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
        }
    }
}

/// Loosely typed report record from either source.
/// Built in code by each provider; missing fields stay at their defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawReport {
    pub reporter: Option<String>,
    pub target_address: Option<String>,
    pub name_tag: Option<String>,
    /// Tag field name used by older registry deployments
    pub ens_name: Option<String>,
    pub reason: RawReason,
    pub evidence: Option<String>,
    pub timestamp: RawTime,
    pub upvotes: u64,
    pub downvotes: u64,
    pub resolved: RawFlag,
    pub malicious: RawFlag,
    pub resolved_by: Option<String>,
    pub resolved_at: RawTime,
}

// ============================================
// Reason tables
// ============================================

/// Registry code -> reason, anything out of range is `Other`
pub fn reason_from_code(code: u64) -> ReportReason {
    usize::try_from(code)
        .ok()
        .and_then(|idx| ReportReason::ALL.get(idx).copied())
        .unwrap_or(ReportReason::Other)
}

/// Label -> reason, unknown labels are `Other`
pub fn reason_from_label(label: &str) -> ReportReason {
    let label = label.trim();
    ReportReason::ALL
        .iter()
        .copied()
        .find(|reason| reason.as_str() == label)
        .unwrap_or(ReportReason::Other)
}

/// Label -> registry code, used only when preparing write intents
pub fn reason_to_code(label: &str) -> u8 {
    let reason = reason_from_label(label);
    ReportReason::ALL
        .iter()
        .position(|r| *r == reason)
        .map(|idx| idx as u8)
        .unwrap_or(5)
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Map one raw record into the canonical report shape
pub fn normalize_report(id: u64, raw: &RawReport) -> Report {
    let reason = match &raw.reason {
        RawReason::Code(code) => reason_from_code(*code),
        RawReason::Label(label) => reason_from_label(label),
    };

    Report {
        id,
        reporter: raw.reporter.clone().unwrap_or_else(|| ZERO_ADDRESS.to_string()),
        target_address: raw.target_address.clone().unwrap_or_else(|| ZERO_ADDRESS.to_string()),
        name_tag: non_empty(&raw.name_tag).or_else(|| non_empty(&raw.ens_name)),
        reason,
        evidence: raw.evidence.clone().unwrap_or_default(),
        timestamp: raw.timestamp.as_millis(),
        upvotes: raw.upvotes,
        downvotes: raw.downvotes,
        resolved: raw.resolved.as_bool(),
        malicious: raw.malicious.as_bool(),
        resolved_by: non_empty(&raw.resolved_by).unwrap_or_else(|| ZERO_ADDRESS.to_string()),
        resolved_at: raw.resolved_at.as_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes() {
        assert_eq!(reason_from_code(0), ReportReason::Phishing);
        assert_eq!(reason_from_code(3), ReportReason::MaliciousContract);
        assert_eq!(reason_from_code(5), ReportReason::Other);
        for code in [6u64, 7, 255, 1_000, u64::MAX] {
            assert_eq!(reason_from_code(code), ReportReason::Other);
        }
    }

    #[test]
    fn test_reason_labels() {
        assert_eq!(reason_from_label(" RugPull "), ReportReason::RugPull);
        assert_eq!(reason_from_label("rugpull"), ReportReason::Other);
        assert_eq!(reason_to_code("Scam"), 1);
        assert_eq!(reason_to_code("Spam"), 4);
        assert_eq!(reason_to_code("Whatever"), 5);
    }

    #[test]
    fn test_chain_shaped_record() {
        let raw = RawReport {
            reporter: Some("0x742d35Cc6634C0532925a3b844Bc454e4438f44e".to_string()),
            target_address: Some("0x22222222222A7f2f2D0efA7D2A6fD6b88E59f6a9".to_string()),
            name_tag: Some(String::new()),
            ens_name: Some("legacy.x1".to_string()),
            reason: RawReason::Code(1),
            evidence: Some("drains approvals".to_string()),
            timestamp: RawTime::Seconds(1_700_000_000),
            upvotes: 4,
            downvotes: 1,
            resolved: RawFlag::Bool(true),
            malicious: RawFlag::Number(1),
            resolved_by: Some("0x6B175474E89094C44Da98b954EedeAC495271d0F".to_string()),
            resolved_at: RawTime::Seconds(1_700_000_500),
        };

        let report = normalize_report(7, &raw);
        assert_eq!(report.id, 7);
        assert_eq!(report.reason, ReportReason::Scam);
        assert_eq!(report.name_tag.as_deref(), Some("legacy.x1"));
        assert_eq!(report.timestamp, 1_700_000_000_000);
        assert_eq!(report.resolved_at, 1_700_000_500_000);
        assert!(report.resolved);
        assert!(report.malicious);
    }

    #[test]
    fn test_name_tag_wins_over_ens_name() {
        let raw = RawReport {
            name_tag: Some("router-honeypot".to_string()),
            ens_name: Some("other".to_string()),
            ..Default::default()
        };
        assert_eq!(normalize_report(0, &raw).name_tag.as_deref(), Some("router-honeypot"));
    }

    #[test]
    fn test_missing_fields_use_sentinels() {
        let report = normalize_report(3, &RawReport::default());
        assert_eq!(report.reporter, ZERO_ADDRESS);
        assert_eq!(report.resolved_by, ZERO_ADDRESS);
        assert_eq!(report.resolved_at, 0);
        assert_eq!(report.timestamp, 0);
        assert_eq!(report.evidence, "");
        assert_eq!(report.name_tag, None);
        assert_eq!(report.reason, ReportReason::Other);
        assert!(!report.resolved);
    }

    #[test]
    fn test_loose_flags_and_labelled_record() {
        let raw = RawReport {
            reporter: Some("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".to_string()),
            target_address: Some("0x33333333333b3f5A6b8Afb5f76D2f21C90eCeA31".to_string()),
            reason: RawReason::Label("Spam".to_string()),
            evidence: Some("dust".to_string()),
            timestamp: RawTime::Millis(1_700_000_000_123),
            upvotes: 2,
            downvotes: 3,
            resolved: RawFlag::Text("false".to_string()),
            malicious: RawFlag::Number(0),
            ..Default::default()
        };

        let report = normalize_report(0, &raw);
        assert_eq!(report.reason, ReportReason::Spam);
        assert_eq!(report.timestamp, 1_700_000_000_123);
        assert!(!report.resolved);
        assert!(!report.malicious);
        assert_eq!(report.downvotes, 3);

        assert!(RawFlag::Text(" YES ".to_string()).as_bool());
        assert!(RawFlag::Number(2).as_bool());
    }
}
