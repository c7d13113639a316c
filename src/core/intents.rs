//! Transaction intents
//!
//! Mutating registry actions are signed by the caller's wallet. These
//! builders only validate input and package the method name and
//! parameters; nothing is written anywhere.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use super::normalizer::{normalize_report, reason_to_code};
use crate::models::errors::{AppError, AppResult};
use crate::providers::source::ReportSource;
use crate::utils::constants::{is_valid_address, MIN_EVIDENCE_LEN};

/// Method + params envelope for an external signer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionIntent {
    pub message: String,
    pub method: String,
    pub params: Value,
}

impl TransactionIntent {
    fn new(message: &str, method: &str, params: Value) -> Self {
        debug!(method, "✍️ Intent prepared");
        Self {
            message: message.to_string(),
            method: method.to_string(),
            params,
        }
    }
}

/// Submission payload as posted by a client
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportInput {
    pub target_address: Option<String>,
    pub name_tag: Option<String>,
    pub reason: Option<String>,
    pub evidence: Option<String>,
}

pub fn prepare_submit(input: &SubmitReportInput) -> AppResult<TransactionIntent> {
    let target = input
        .target_address
        .as_deref()
        .map(str::trim)
        .filter(|addr| is_valid_address(addr))
        .ok_or_else(|| AppError::bad_request("Invalid targetAddress"))?;

    let evidence = input.evidence.as_deref().map(str::trim).unwrap_or_default();
    // measured in UTF-16 code units, like browser-side length checks
    if evidence.encode_utf16().count() < MIN_EVIDENCE_LEN {
        return Err(AppError::bad_request(format!(
            "Evidence must be at least {} characters",
            MIN_EVIDENCE_LEN
        )));
    }

    Ok(TransactionIntent::new(
        "Prepare a wallet-signed transaction to submit this report on-chain.",
        "submitReport",
        json!({
            "targetAddress": target,
            "nameTag": input.name_tag.as_deref().map(str::trim).unwrap_or_default(),
            "reason": reason_to_code(input.reason.as_deref().unwrap_or("Other")),
            "evidence": evidence,
        }),
    ))
}

/// Vote intent; the registry refuses votes on resolved reports
pub async fn prepare_vote(
    source: &ReportSource,
    report_id: u64,
    upvote: Option<bool>,
) -> AppResult<TransactionIntent> {
    let upvote = upvote.ok_or_else(|| AppError::bad_request("upvote must be a boolean"))?;

    if let ReportSource::Onchain(client) = source {
        if report_id >= client.report_count().await? {
            return Err(AppError::not_found("Report not found"));
        }
        let report = normalize_report(report_id, &client.report(report_id).await?);
        if report.resolved {
            return Err(AppError::already_resolved(report_id));
        }
    }

    Ok(TransactionIntent::new(
        "Prepare a wallet-signed transaction to vote on this report.",
        "voteOnReport",
        json!({ "reportId": report_id, "upvote": upvote }),
    ))
}

/// Resolve intent; on-chain eligibility is the registry's call
pub async fn prepare_resolve(
    source: &ReportSource,
    report_id: u64,
    malicious: Option<bool>,
) -> AppResult<TransactionIntent> {
    let malicious = malicious.ok_or_else(|| AppError::bad_request("malicious must be a boolean"))?;

    if let ReportSource::Onchain(client) = source {
        if !client.can_resolve(report_id, malicious).await? {
            return Err(AppError::resolve_not_allowed(report_id, malicious));
        }
    }

    Ok(TransactionIntent::new(
        "Prepare a wallet-signed transaction to resolve this report.",
        "resolveReport",
        json!({ "reportId": report_id, "malicious": malicious }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;
    use crate::providers::demo::DemoReportStore;
    use crate::providers::mock::{chain_report, MockChain};
    use std::sync::Arc;

    const TARGET: &str = "0x22222222222A7f2f2D0efA7D2A6fD6b88E59f6a9";

    fn submit(evidence: &str, reason: Option<&str>) -> AppResult<TransactionIntent> {
        prepare_submit(&SubmitReportInput {
            target_address: Some(TARGET.to_string()),
            name_tag: Some("  fake-airdrop ".to_string()),
            reason: reason.map(str::to_string),
            evidence: Some(evidence.to_string()),
        })
    }

    #[test]
    fn test_submit_intent() {
        let intent = submit("  Drains approvals after signing  ", Some("RugPull")).unwrap();
        assert_eq!(intent.method, "submitReport");
        assert_eq!(intent.params["reason"], 2);
        assert_eq!(intent.params["nameTag"], "fake-airdrop");
        assert_eq!(intent.params["evidence"], "Drains approvals after signing");
    }

    #[test]
    fn test_submit_reason_defaults_to_other() {
        assert_eq!(submit("long enough evidence", None).unwrap().params["reason"], 5);
        assert_eq!(submit("long enough evidence", Some("nonsense")).unwrap().params["reason"], 5);
    }

    #[test]
    fn test_short_evidence_always_rejected() {
        for reason in [None, Some("Phishing"), Some("Scam"), Some("bogus")] {
            let err = submit("   too short   ", reason).unwrap_err();
            assert_eq!(err.code, ErrorCode::ApiBadRequest);
        }
        assert!(submit("123456789", Some("Spam")).is_err());
        assert!(submit("1234567890", Some("Spam")).is_ok());
    }

    #[test]
    fn test_evidence_length_counts_utf16_units() {
        // each emoji is a surrogate pair
        assert!(submit("😀😀😀😀😀", Some("Scam")).is_ok());
        assert!(submit("😀😀😀😀", Some("Scam")).is_err());
        assert!(submit("ünïcödé ök", Some("Scam")).is_ok());
    }

    #[test]
    fn test_submit_requires_valid_target() {
        let err = prepare_submit(&SubmitReportInput {
            target_address: Some("0x1234".to_string()),
            evidence: Some("plenty of evidence here".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.message, "Invalid targetAddress");
    }

    fn demo() -> ReportSource {
        ReportSource::Demo(Arc::new(DemoReportStore::seeded(0)))
    }

    fn chain() -> ReportSource {
        let chain = MockChain::new()
            .with_report(0, chain_report(TARGET, 1, 5, false))
            .with_report(1, chain_report(TARGET, 2, 5, true))
            .with_resolvable(0, true, true);
        ReportSource::Onchain(Arc::new(chain))
    }

    #[tokio::test]
    async fn test_vote_requires_boolean() {
        let err = prepare_vote(&demo(), 1, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ApiBadRequest);

        let intent = prepare_vote(&demo(), 1, Some(false)).await.unwrap();
        assert_eq!(intent.method, "voteOnReport");
        assert_eq!(intent.params["upvote"], false);
    }

    #[tokio::test]
    async fn test_vote_on_resolved_report_rejected_onchain() {
        assert!(prepare_vote(&chain(), 0, Some(true)).await.is_ok());

        let err = prepare_vote(&chain(), 1, Some(true)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ReportAlreadyResolved);

        let err = prepare_vote(&chain(), 8, Some(true)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ApiNotFound);
    }

    #[tokio::test]
    async fn test_resolve_checks_eligibility_onchain() {
        let intent = prepare_resolve(&chain(), 0, Some(true)).await.unwrap();
        assert_eq!(intent.method, "resolveReport");
        assert_eq!(intent.params["malicious"], true);

        let err = prepare_resolve(&chain(), 0, Some(false)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ResolveNotAllowed);

        // demo mode only packages
        assert!(prepare_resolve(&demo(), 0, Some(false)).await.is_ok());
        assert!(prepare_resolve(&demo(), 0, None).await.is_err());
    }
}
