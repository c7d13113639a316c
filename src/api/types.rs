//! API Request/Response Types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::errors::AppError;
use crate::models::types::{CheckResult, Mode};
use crate::utils::cache::CacheStats;

/// Error body: `{"error": {"code", "message"}}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ApiError,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            error: ApiError {
                code: err.code_str().to_string(),
                message: err.public_message(),
            },
        }
    }
}

/// `GET /`
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// `GET /health`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub status: &'static str,
    pub chain_mode: Mode,
    pub chain_name: String,
    pub uptime_seconds: u64,
    pub cache: CacheStats,
    pub timestamp: String,
}

/// Check result plus the cache flag, which is not part of the stored record
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    #[serde(flatten)]
    pub result: CheckResult,
    pub cached: bool,
}

/// Raw `limit`/`offset` query; parsed leniently
#[derive(Debug, Default, Deserialize)]
pub struct ReportsQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VoteRequest {
    pub upvote: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResolveRequest {
    pub malicious: Option<bool>,
}

/// Non-negative integer from a query or path value, floored.
/// Anything else yields `None`.
pub fn parse_non_negative(raw: Option<&str>) -> Option<u64> {
    let value: f64 = raw?.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 || value >= u64::MAX as f64 {
        return None;
    }
    Some(value.floor() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_non_negative() {
        assert_eq!(parse_non_negative(Some("5")), Some(5));
        assert_eq!(parse_non_negative(Some(" 2.9 ")), Some(2));
        assert_eq!(parse_non_negative(Some("0")), Some(0));
        assert_eq!(parse_non_negative(Some("-1")), None);
        assert_eq!(parse_non_negative(Some("abc")), None);
        assert_eq!(parse_non_negative(Some("NaN")), None);
        assert_eq!(parse_non_negative(Some("inf")), None);
        assert_eq!(parse_non_negative(None), None);
    }

    #[test]
    fn test_error_body_hides_internal_detail() {
        let err = AppError::evaluation_failed(AppError::rpc_error("node at 10.0.0.3 refused"));
        let body = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(body["error"]["code"], "EVALUATION_FAILED");
        assert_eq!(body["error"]["message"], "Failed to evaluate address");
    }
}
