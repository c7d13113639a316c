//! Privacy Scorer
//!
//! Starts at 100 and stacks one deduction per signal (highest matching tier
//! only). Activity lookups that fail are treated as "no activity" and never
//! fail the evaluation.

use alloy_primitives::Address;
use tracing::{debug, warn};

use crate::models::types::{AddressActivity, PrivacyAnalysis, PrivacyFactors, PrivacyGrade};
use crate::providers::chain::ActivitySource;

const TX_TIERS: [(u64, u8); 5] = [(1000, 30), (500, 25), (100, 20), (25, 15), (0, 8)];
const BALANCE_TIERS: [(f64, u8); 4] = [(100.0, 25), (10.0, 18), (1.0, 12), (0.1, 6)];
const REPORT_TIERS: [(u64, u8); 4] = [(10, 25), (5, 18), (2, 12), (0, 6)];
const CONTRACT_PENALTY: u8 = 8;

pub const RECOMMEND_ROTATE: &str = "Rotate operational wallets for sensitive flows.";
pub const RECOMMEND_SEGMENT: &str = "Segment treasury and hot-wallet balances by risk profile.";
pub const RECOMMEND_CLEAN_ADDRESS: &str =
    "Move critical operations to a clean address until reports are resolved.";
pub const RECOMMEND_ROLE_WALLETS: &str =
    "Adopt role-specific wallets to reduce exposure blast radius.";

/// Fetch activity if a source is available, degrading to zero signals
pub async fn fetch_activity<A>(source: Option<&A>, address: Address) -> AddressActivity
where
    A: ActivitySource + ?Sized,
{
    let Some(source) = source else {
        return AddressActivity::default();
    };

    match source.activity(address).await {
        Ok(activity) => activity,
        Err(e) => {
            warn!("⚠️ Activity lookup failed for {}, scoring without it: {}", address, e);
            AddressActivity::default()
        }
    }
}

/// Full privacy analysis for `address`
pub async fn calculate_privacy<A>(
    address: Address,
    report_count: usize,
    source: Option<&A>,
) -> PrivacyAnalysis
where
    A: ActivitySource + ?Sized,
{
    let activity = fetch_activity(source, address).await;
    let analysis = score_privacy(&activity, report_count);
    debug!(
        address = %address,
        score = analysis.score,
        "🔒 Privacy scored"
    );
    analysis
}

fn tier_u64(value: u64, tiers: &[(u64, u8)]) -> u8 {
    tiers
        .iter()
        .find(|(threshold, _)| value > *threshold)
        .map(|(_, penalty)| *penalty)
        .unwrap_or(0)
}

fn tier_f64(value: f64, tiers: &[(f64, u8)]) -> u8 {
    tiers
        .iter()
        .find(|(threshold, _)| value > *threshold)
        .map(|(_, penalty)| *penalty)
        .unwrap_or(0)
}

/// Pure scoring step over already-fetched signals
pub fn score_privacy(activity: &AddressActivity, report_count: usize) -> PrivacyAnalysis {
    let tx_count = activity.transaction_count;
    let balance = if activity.balance.is_finite() { activity.balance } else { 0.0 };

    let deductions = tier_u64(tx_count, &TX_TIERS) as i32
        + tier_f64(balance, &BALANCE_TIERS) as i32
        + tier_u64(report_count as u64, &REPORT_TIERS) as i32
        + if activity.is_contract { CONTRACT_PENALTY as i32 } else { 0 };

    let score = (100 - deductions).clamp(0, 100) as u8;

    let address_reuse = (tx_count as f64 * 1.2).round().min(100.0) as u8;

    let mut recommendations = Vec::new();
    if tx_count > 50 {
        recommendations.push(RECOMMEND_ROTATE.to_string());
    }
    if balance > 1.0 {
        recommendations.push(RECOMMEND_SEGMENT.to_string());
    }
    if report_count > 0 {
        recommendations.push(RECOMMEND_CLEAN_ADDRESS.to_string());
    }
    if score < 70 {
        recommendations.push(RECOMMEND_ROLE_WALLETS.to_string());
    }

    PrivacyAnalysis {
        score,
        grade: PrivacyGrade::from_score(score),
        factors: PrivacyFactors {
            transaction_activity: tx_count,
            balance_exposure: balance,
            public_scrutiny: report_count,
            address_reuse,
            is_contract: activity.is_contract,
        },
        recommendations,
    }
}
