//! Unified error handling for Callboard
//!
//! Malformed call records are never errors: the analytics pass degrades per
//! field and reports them as diagnostics. The variants here cover the view
//! boundary (access, upstream fetch, request parameters) and startup.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Main application error type
///
/// It implements `ResponseError` for automatic HTTP response generation.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Access Errors ====================
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Upstream rejected credentials: {0}")]
    Unauthorized(String),

    // ==================== Upstream Errors ====================
    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    #[error("Upstream returned an unreadable payload: {0}")]
    UpstreamPayload(String),

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    // ==================== Resource Errors ====================
    #[error("Not found: {0}")]
    NotFound(String),

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation(_) => StatusCode::BAD_REQUEST,

            // 403 Forbidden
            AppError::Forbidden(_) | AppError::Unauthorized(_) => StatusCode::FORBIDDEN,

            // 404 Not Found
            AppError::NotFound(_) => StatusCode::NOT_FOUND,

            // 502 Bad Gateway
            AppError::Upstream(_) | AppError::UpstreamPayload(_) => StatusCode::BAD_GATEWAY,

            // 500 Internal Server Error
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Forbidden(_) => "forbidden",
            AppError::Unauthorized(_) => "upstream_unauthorized",
            AppError::Upstream(_) => "upstream_unavailable",
            AppError::UpstreamPayload(_) => "upstream_payload",
            AppError::Validation(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }

    /// True when the failure means the caller has no access, as opposed to a
    /// transient failure that a retry might fix.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, AppError::Forbidden(_) | AppError::Unauthorized(_))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        match err.status().map(|s| s.as_u16()) {
            Some(401) | Some(403) => AppError::Unauthorized(err.to_string()),
            _ if err.is_decode() => AppError::UpstreamPayload(err.to_string()),
            _ => AppError::Upstream(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::Forbidden("retell disabled".to_string()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("call_123".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Upstream("connection reset".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Validation("page".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Unauthorized("401".to_string()).error_code(),
            "upstream_unauthorized"
        );
        assert_eq!(
            AppError::UpstreamPayload("not an array".to_string()).error_code(),
            "upstream_payload"
        );
    }

    #[test]
    fn test_access_denied_vs_transient() {
        assert!(AppError::Forbidden("off".to_string()).is_access_denied());
        assert!(AppError::Unauthorized("401".to_string()).is_access_denied());
        assert!(!AppError::Upstream("timeout".to_string()).is_access_denied());
    }
}
