//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code for log searches.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - RPC_xxx: upstream chain errors
//! - API_xxx: request errors
//! - CFG_xxx: configuration errors

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// Message that is safe to hand back to a caller
    pub fn public_message(&self) -> String {
        if self.code.http_status() >= 500 {
            self.code.public_message().to_string()
        } else {
            self.message.clone()
        }
    }

    /// True for failures caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        self.code.http_status() < 500
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // RPC Errors
    // ============================================
    /// RPC connection failed
    RpcConnectionFailed,
    /// RPC request timeout
    RpcTimeout,
    /// RPC returned error response
    RpcError,
    /// Invalid RPC response
    RpcInvalidResponse,

    // ============================================
    // API Errors
    // ============================================
    /// Invalid request format
    ApiBadRequest,
    /// Resource not found
    ApiNotFound,
    /// Vote on a report that is already resolved
    ReportAlreadyResolved,
    /// Registry refused the resolution for this direction
    ResolveNotAllowed,
    /// Address evaluation failed
    EvaluationFailed,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Invalid configuration value (startup only)
    ConfigInvalidValue,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RpcConnectionFailed => "RPC_CONNECTION_FAILED",
            Self::RpcTimeout => "RPC_TIMEOUT",
            Self::RpcError => "RPC_ERROR",
            Self::RpcInvalidResponse => "RPC_INVALID_RESPONSE",

            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiNotFound => "API_NOT_FOUND",
            Self::ReportAlreadyResolved => "REPORT_ALREADY_RESOLVED",
            Self::ResolveNotAllowed => "RESOLVE_NOT_ALLOWED",
            Self::EvaluationFailed => "EVALUATION_FAILED",

            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiBadRequest => 400,
            Self::ResolveNotAllowed => 403,
            Self::ApiNotFound => 404,
            Self::ReportAlreadyResolved => 409,
            Self::RpcConnectionFailed | Self::RpcError | Self::RpcInvalidResponse => 502,
            Self::RpcTimeout => 504,
            _ => 500,
        }
    }

    /// Generic message for server-side faults
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::RpcConnectionFailed
            | Self::RpcTimeout
            | Self::RpcError
            | Self::RpcInvalidResponse => "Upstream chain unavailable",
            Self::EvaluationFailed => "Failed to evaluate address",
            _ => "Internal server error",
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// RPC connection failed
    pub fn rpc_connection_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::RpcConnectionFailed, msg)
    }

    /// RPC returned an error
    pub fn rpc_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::RpcError, msg)
    }

    /// RPC result could not be decoded
    pub fn rpc_invalid_response(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::RpcInvalidResponse, msg)
    }

    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    /// Resource not found
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiNotFound, msg)
    }

    /// Report already resolved
    pub fn already_resolved(report_id: u64) -> Self {
        Self::new(
            ErrorCode::ReportAlreadyResolved,
            format!("Report {} is already resolved", report_id),
        )
    }

    /// Resolution not allowed yet
    pub fn resolve_not_allowed(report_id: u64, malicious: bool) -> Self {
        Self::new(
            ErrorCode::ResolveNotAllowed,
            format!(
                "Report {} cannot be resolved as {} yet",
                report_id,
                if malicious { "malicious" } else { "safe" }
            ),
        )
    }

    /// Evaluation failed, wrapping the real cause
    pub fn evaluation_failed(cause: AppError) -> Self {
        Self::with_source(ErrorCode::EvaluationFailed, cause.message.clone(), cause)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        let message = err.to_string();
        if message.contains("timed out") || message.contains("timeout") {
            Self::new(ErrorCode::RpcTimeout, message)
        } else if message.contains("Request failed") {
            Self::new(ErrorCode::RpcConnectionFailed, message)
        } else {
            Self::new(ErrorCode::RpcError, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::bad_request("Invalid address");
        assert_eq!(err.code, ErrorCode::ApiBadRequest);
        assert_eq!(err.code_str(), "API_BAD_REQUEST");
        assert_eq!(err.to_string(), "[API_BAD_REQUEST] Invalid address");
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::ApiBadRequest.http_status(), 400);
        assert_eq!(ErrorCode::ApiNotFound.http_status(), 404);
        assert_eq!(ErrorCode::ReportAlreadyResolved.http_status(), 409);
        assert_eq!(ErrorCode::RpcError.http_status(), 502);
        assert_eq!(ErrorCode::EvaluationFailed.http_status(), 500);
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AppError::evaluation_failed(AppError::rpc_error("node at 10.0.0.3 refused"));
        assert_eq!(err.public_message(), "Failed to evaluate address");
        assert!(!err.is_client_error());

        let err = AppError::bad_request("Evidence must be at least 10 characters");
        assert_eq!(err.public_message(), "Evidence must be at least 10 characters");
    }

    #[test]
    fn test_eyre_conversion() {
        let err: AppError = eyre::eyre!("Request failed: connection refused").into();
        assert_eq!(err.code, ErrorCode::RpcConnectionFailed);

        let err: AppError = eyre::eyre!("Request timed out: deadline").into();
        assert_eq!(err.code, ErrorCode::RpcTimeout);
        assert_eq!(err.code.http_status(), 504);
    }

    #[test]
    fn test_config_error_is_server_side() {
        let err = AppError::new(ErrorCode::ConfigInvalidValue, "RPC URL is empty");
        assert_eq!(err.code.http_status(), 500);
        assert!(!err.is_client_error());
        assert_eq!(err.public_message(), "Internal server error");
    }
}
