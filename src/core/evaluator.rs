//! Evaluation Orchestrator
//!
//! One pass per request:
//! 1. Cache lookup (namespaced, lower-cased address)
//! 2. Gather reports from the configured source
//! 3. Risk from the registry (on-chain) or the vote scorer (demo)
//! 4. Privacy score and external flags, concurrently
//! 5. Assemble, cache, return
//!
//! Concurrent misses for the same address each do the full work; results
//! are pure functions of the fetched state so the last write wins safely.

use alloy_primitives::Address;
use chrono::{SecondsFormat, Utc};
use std::time::Instant;
use tracing::{error, info};

use super::external::ExternalFlagAggregator;
use super::normalizer::normalize_report;
use super::privacy::calculate_privacy;
use super::risk_score::RiskAssessment;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{CheckResult, Mode, Report};
use crate::providers::source::ReportSource;
use crate::utils::cache::EvaluationCache;
use crate::utils::constants::parse_address;

/// Evaluation plus whether it was served from cache
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub result: CheckResult,
    pub cached: bool,
}

#[derive(Clone)]
pub struct Evaluator {
    source: ReportSource,
    cache: EvaluationCache,
    external: ExternalFlagAggregator,
}

impl Evaluator {
    pub fn new(source: ReportSource, cache: EvaluationCache) -> Self {
        Self {
            source,
            cache,
            external: ExternalFlagAggregator::new(),
        }
    }

    pub fn with_external(mut self, external: ExternalFlagAggregator) -> Self {
        self.external = external;
        self
    }

    pub fn mode(&self) -> Mode {
        self.source.mode()
    }

    pub fn source(&self) -> &ReportSource {
        &self.source
    }

    pub fn cache(&self) -> &EvaluationCache {
        &self.cache
    }

    /// Evaluate one address. Upstream failures surface as `EVALUATION_FAILED`.
    pub async fn evaluate(&self, address: &str) -> AppResult<Evaluation> {
        let address = address.trim();
        let target =
            parse_address(address).ok_or_else(|| AppError::bad_request("Invalid EVM address"))?;

        if let Some(result) = self.cache.get(address) {
            return Ok(Evaluation {
                result,
                cached: true,
            });
        }

        let start = Instant::now();
        let result = self.compute(address, target).await.map_err(|e| {
            error!(address, error = %e, "❌ Evaluation failed");
            if e.is_client_error() {
                e
            } else {
                AppError::evaluation_failed(e)
            }
        })?;

        info!(
            address,
            mode = result.mode.as_str(),
            risk = result.risk_score,
            privacy = result.privacy_score,
            reports = result.report_count,
            latency_ms = start.elapsed().as_millis() as u64,
            "🔍 Address evaluated"
        );

        self.cache.set(address, result.clone());
        Ok(Evaluation {
            result,
            cached: false,
        })
    }

    async fn gather(&self, address: &str, target: Address) -> AppResult<(Vec<Report>, RiskAssessment)> {
        match &self.source {
            ReportSource::Onchain(client) => {
                let (check, score) =
                    tokio::try_join!(client.check_address(target), client.risk_score(target))?;

                let mut reports = Vec::with_capacity(check.report_ids.len());
                for id in check.report_ids {
                    let raw = client.report(id).await?;
                    reports.push(normalize_report(id, &raw));
                }

                let assessment = RiskAssessment {
                    is_flagged: check.is_flagged,
                    risk_score: score.min(100) as u8,
                };
                Ok((reports, assessment))
            }
            ReportSource::Demo(store) => {
                let reports = store.for_target(address);
                let assessment = RiskAssessment::from_reports(&reports);
                Ok((reports, assessment))
            }
        }
    }

    async fn compute(&self, address: &str, target: Address) -> AppResult<CheckResult> {
        let (reports, assessment) = self.gather(address, target).await?;

        let (privacy, external_flags) = tokio::join!(
            calculate_privacy(target, reports.len(), self.source.chain()),
            self.external.aggregate(target),
        );

        Ok(CheckResult {
            address: address.to_string(),
            is_flagged: assessment.is_flagged,
            risk_score: assessment.risk_score,
            privacy_score: privacy.score,
            privacy_grade: privacy.grade,
            privacy_factors: privacy.factors,
            privacy_recommendations: privacy.recommendations,
            report_count: reports.len(),
            reports,
            external_flags,
            mode: self.source.mode(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}
