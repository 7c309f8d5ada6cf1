//! Scavenge API: error types and their HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scavenge_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always `false`.
    pub ok: bool,
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Individual request validation failures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl ErrorBody {
    fn new(error: &'static str, message: String) -> Self {
        Self {
            ok: false,
            error,
            message: Some(message),
            details: Vec::new(),
        }
    }
}

/// JSON body for gameplay rejections.
#[derive(Debug, Serialize)]
pub struct RejectionBody {
    /// Always `false`.
    pub ok: bool,
    /// Wire tag such as `LOCKED`.
    pub reason: &'static str,
}

/// HTTP-layer error that implements `IntoResponse`.
#[derive(Debug)]
pub enum ApiError {
    /// A handler failed.
    Domain(DomainError),
    /// The request body failed boundary validation.
    InvalidRequest(Vec<String>),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            Self::InvalidRequest(details) => {
                let body = ErrorBody {
                    ok: false,
                    error: "VALIDATION_ERROR",
                    message: None,
                    details,
                };
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
            Self::Domain(err) => err,
        };

        if let Some(reason) = err.reason() {
            let body = RejectionBody { ok: false, reason };
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }

        let (status, error_code) = match &err {
            DomainError::HuntNotFound(_)
            | DomainError::HuntNotFoundByKey(_)
            | DomainError::PostItNotFound(_)
            | DomainError::OptionNotFound(_)
            | DomainError::PostItMismatch { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            DomainError::HuntNotPublished(_)
            | DomainError::HuntAlreadyCompleted(_)
            | DomainError::EmptyHunt(_)
            | DomainError::InvalidTransition { .. } => (StatusCode::CONFLICT, "CONFLICT"),
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            DomainError::Locked(_)
            | DomainError::SkipNotAllowed(_)
            | DomainError::PhotoRequired(_)
            | DomainError::InvalidOption(_)
            | DomainError::GenerationExhausted(_)
            | DomainError::Infrastructure(_) => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        (status, Json(ErrorBody::new(error_code, err.to_string()))).into_response()
    }
}
