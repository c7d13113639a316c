//! Risk Scoring Module
//! Vote-based 0-100 risk score for the fallback report set
//!
//! The on-chain registry computes its own score; this module is only used
//! when the service runs against the static demo reports.

use serde::{Deserialize, Serialize};

use crate::models::types::Report;
use crate::utils::constants::FLAG_UPVOTE_THRESHOLD;

/// Flag verdict and score for one address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub is_flagged: bool,
    /// Overall score (0-100)
    pub risk_score: u8,
}

impl RiskAssessment {
    /// Score the reports whose target matches the queried address
    pub fn from_reports(reports: &[Report]) -> Self {
        Self {
            is_flagged: is_flagged(reports),
            risk_score: risk_score(reports),
        }
    }
}

/// A confirmed-malicious report, or an open one with enough net support
pub fn is_flagged(reports: &[Report]) -> bool {
    reports.iter().any(|report| {
        if report.resolved {
            report.malicious
        } else {
            report.upvotes >= FLAG_UPVOTE_THRESHOLD && report.upvotes > report.downvotes
        }
    })
}

/// Net votes over active reports, damped by `active + 1`
pub fn risk_score(reports: &[Report]) -> u8 {
    if reports.is_empty() {
        return 0;
    }

    // u128 so vote totals near u64::MAX cannot overflow
    let active: Vec<&Report> = reports.iter().filter(|r| r.is_active()).collect();
    let total_upvotes: u128 = active.iter().map(|r| u128::from(r.upvotes)).sum();
    let total_downvotes: u128 = active.iter().map(|r| u128::from(r.downvotes)).sum();

    if total_upvotes == 0 {
        return 0;
    }

    let net_votes = total_upvotes.saturating_sub(total_downvotes);
    let denominator = active.len() as u128 + 1;
    // round half up
    let score = (net_votes.saturating_mul(100).saturating_add(denominator / 2)) / denominator;

    score.min(100) as u8
}
