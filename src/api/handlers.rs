//! API Request Handlers

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn};

use super::types::*;
use crate::core::evaluator::Evaluator;
use crate::core::intents::{self, SubmitReportInput, TransactionIntent};
use crate::core::reports::{self, Page, ReportPage};
use crate::models::config::{AppConfig, ChainInfo};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::Report;
use crate::utils::constants::{APP_NAME, APP_VERSION, DEFAULT_PAGE_LIMIT};

/// Shared application state
pub struct AppState {
    pub evaluator: Evaluator,
    pub config: AppConfig,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(evaluator: Evaluator, config: AppConfig) -> Self {
        Self {
            evaluator,
            config,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(code = self.code_str(), error = %self, "❌ Request failed");
        } else {
            warn!(code = self.code_str(), message = %self.message, "⚠️ Request rejected");
        }
        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

// ============================================
// Service
// ============================================

pub async fn root() -> Json<ServiceInfo> {
    let endpoints = BTreeMap::from([
        ("config", "/api/config"),
        ("check", "/api/check/:address"),
        ("reports", "/api/reports"),
        ("health", "/health"),
    ]);
    Json(ServiceInfo {
        name: APP_NAME,
        version: APP_VERSION,
        endpoints,
    })
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthData> {
    Json(HealthData {
        status: "ok",
        chain_mode: state.evaluator.mode(),
        chain_name: state.config.chain_name.clone(),
        uptime_seconds: state.uptime_seconds(),
        cache: state.evaluator.cache().stats(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ChainInfo> {
    let mut info = state.config.chain_info();
    info.mode = state.evaluator.mode();
    Json(info)
}

// ============================================
// Address Check
// ============================================

pub async fn check_address(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> AppResult<Json<CheckResponse>> {
    let evaluation = state.evaluator.evaluate(&address).await?;
    Ok(Json(CheckResponse {
        result: evaluation.result,
        cached: evaluation.cached,
    }))
}

// ============================================
// Reports
// ============================================

pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportsQuery>,
) -> AppResult<Json<ReportPage>> {
    let page = Page {
        limit: parse_non_negative(query.limit.as_deref()).unwrap_or(DEFAULT_PAGE_LIMIT),
        offset: parse_non_negative(query.offset.as_deref()).unwrap_or(0),
    };
    let page = reports::list_reports(state.evaluator.source(), page).await?;
    Ok(Json(page))
}

pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<Report>> {
    let id = parse_report_id(&id)?;
    let report = reports::get_report(state.evaluator.source(), id).await?;
    Ok(Json(report))
}

pub async fn submit_report(
    body: Result<Json<SubmitReportInput>, JsonRejection>,
) -> AppResult<Json<TransactionIntent>> {
    let input = json_body(body)?;
    Ok(Json(intents::prepare_submit(&input)?))
}

pub async fn vote_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<VoteRequest>, JsonRejection>,
) -> AppResult<Json<TransactionIntent>> {
    let id = parse_report_id(&id)?;
    let req = json_body(body)?;
    let intent = intents::prepare_vote(state.evaluator.source(), id, req.upvote).await?;
    Ok(Json(intent))
}

pub async fn resolve_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<ResolveRequest>, JsonRejection>,
) -> AppResult<Json<TransactionIntent>> {
    let id = parse_report_id(&id)?;
    let req = json_body(body)?;
    let intent = intents::prepare_resolve(state.evaluator.source(), id, req.malicious).await?;
    Ok(Json(intent))
}

/// Malformed bodies become the usual 400 error shape
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}

fn parse_report_id(raw: &str) -> AppResult<u64> {
    parse_non_negative(Some(raw)).ok_or_else(|| AppError::bad_request("Invalid report id"))
}

/// Unmatched routes
pub async fn not_found() -> AppError {
    AppError::not_found("Route not found")
}
