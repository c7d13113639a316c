//! Type definitions for the address evaluation pipeline
//! Canonical read model shared by both report sources

use serde::{Deserialize, Serialize};

/// Reason attached to a safety report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportReason {
    Phishing,
    Scam,
    RugPull,
    MaliciousContract,
    Spam,
    Other,
}

impl ReportReason {
    /// All reasons, ordered by their registry code
    pub const ALL: [ReportReason; 6] = [
        ReportReason::Phishing,
        ReportReason::Scam,
        ReportReason::RugPull,
        ReportReason::MaliciousContract,
        ReportReason::Spam,
        ReportReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportReason::Phishing => "Phishing",
            ReportReason::Scam => "Scam",
            ReportReason::RugPull => "RugPull",
            ReportReason::MaliciousContract => "MaliciousContract",
            ReportReason::Spam => "Spam",
            ReportReason::Other => "Other",
        }
    }
}

/// Which backing source served an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Onchain,
    Demo,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Onchain => "onchain",
            Mode::Demo => "demo",
        }
    }
}

/// Canonical, source-independent safety report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Source-scoped id (not unique across sources)
    pub id: u64,
    pub reporter: String,
    pub target_address: String,
    pub name_tag: Option<String>,
    pub reason: ReportReason,
    pub evidence: String,
    /// Creation time in unix milliseconds
    pub timestamp: i64,
    pub upvotes: u64,
    pub downvotes: u64,
    pub resolved: bool,
    /// Only authoritative when `resolved` is true
    pub malicious: bool,
    pub resolved_by: String,
    /// Unix milliseconds, 0 while unresolved
    pub resolved_at: i64,
}

impl Report {
    /// Counted toward risk scoring unless resolved and exonerated
    #[inline]
    pub fn is_active(&self) -> bool {
        !(self.resolved && !self.malicious)
    }
}

/// Letter grade derived from the privacy score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrivacyGrade {
    A,
    B,
    C,
    D,
    F,
}

impl PrivacyGrade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => PrivacyGrade::A,
            80..=89 => PrivacyGrade::B,
            70..=79 => PrivacyGrade::C,
            60..=69 => PrivacyGrade::D,
            _ => PrivacyGrade::F,
        }
    }
}

/// Signals that fed the privacy score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyFactors {
    pub transaction_activity: u64,
    pub balance_exposure: f64,
    pub public_scrutiny: usize,
    pub address_reuse: u8,
    pub is_contract: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivacyAnalysis {
    pub score: u8,
    pub grade: PrivacyGrade,
    pub factors: PrivacyFactors,
    pub recommendations: Vec<String>,
}

/// One third-party scam-list verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFlagSource {
    pub source: String,
    pub flagged: bool,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalFlags {
    pub scam_lists: Vec<ExternalFlagSource>,
    pub total_flags: usize,
}

impl ExternalFlags {
    /// Merge verdicts by concatenation, counting the flagged ones
    pub fn from_sources(scam_lists: Vec<ExternalFlagSource>) -> Self {
        let total_flags = scam_lists.iter().filter(|s| s.flagged).count();
        Self {
            scam_lists,
            total_flags,
        }
    }
}

/// Full evaluation of one address, the unit stored in the cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub address: String,
    pub is_flagged: bool,
    pub risk_score: u8,
    pub privacy_score: u8,
    pub privacy_grade: PrivacyGrade,
    pub privacy_factors: PrivacyFactors,
    pub privacy_recommendations: Vec<String>,
    pub report_count: usize,
    pub reports: Vec<Report>,
    pub external_flags: ExternalFlags,
    pub mode: Mode,
    /// ISO-8601 evaluation time
    pub timestamp: String,
}

/// Activity signals read from the chain for the privacy score
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AddressActivity {
    pub transaction_count: u64,
    /// Native-currency units
    pub balance: f64,
    pub is_contract: bool,
}

/// Result of the registry's `checkAddress` view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressCheck {
    pub is_flagged: bool,
    pub report_ids: Vec<u64>,
}
