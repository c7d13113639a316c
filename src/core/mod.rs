//! Core Module - Evaluation Logic
//!
//! Normalization, scoring, orchestration and report/intent operations.

pub mod evaluator;
pub mod external;
pub mod intents;
pub mod normalizer;
pub mod privacy;
pub mod reports;
pub mod risk_score;

pub use evaluator::{Evaluation, Evaluator};
pub use external::{ExternalFlagAggregator, FlagSource};
pub use intents::{prepare_resolve, prepare_submit, prepare_vote, SubmitReportInput, TransactionIntent};
pub use normalizer::{normalize_report, RawReport};
pub use reports::{get_report, list_reports, Page, ReportPage};
pub use risk_score::RiskAssessment;
