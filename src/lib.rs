//! X1 Sentinel
//!
//! Address risk and privacy evaluation backed by an on-chain safety
//! registry, with a static demo report set when no chain is configured.
//! - Community reports normalized into one canonical shape
//! - Risk score from registry or vote-weighted reports
//! - Privacy exposure score from on-chain activity
//! - Cached evaluations behind an axum HTTP API

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::{Evaluation, Evaluator};
pub use models::{AppConfig, AppError, AppResult, CheckResult, ErrorCode, Mode, Report};
pub use providers::ReportSource;
pub use utils::{CacheStats, EvaluationCache};
