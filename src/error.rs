//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::{AmountError, LedgerError};

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Malformed request")]
    MalformedRequest(String),

    #[error("Amount must be greater than zero")]
    InvalidAmount(#[from] AmountError),

    // Ledger errors
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str, Option<String>) {
        match self {
            // 400 Bad Request
            AppError::MalformedRequest(msg) => {
                (StatusCode::BAD_REQUEST, "malformed_request", Some(msg.clone()))
            }
            AppError::InvalidAmount(e) => {
                (StatusCode::BAD_REQUEST, "invalid_amount", Some(e.to_string()))
            }

            AppError::Ledger(ledger_err) => {
                let (status, code) = match ledger_err {
                    LedgerError::InvalidAmount(_) | LedgerError::Overflow(_) => {
                        (StatusCode::BAD_REQUEST, "invalid_amount")
                    }
                    LedgerError::SameAccount => (StatusCode::BAD_REQUEST, "same_account_transfer"),
                    LedgerError::AccountNotFound(_) => (StatusCode::NOT_FOUND, "account_not_found"),
                    LedgerError::InsufficientFunds { .. } => {
                        (StatusCode::FORBIDDEN, "insufficient_balance")
                    }
                    // Seed errors; never raised while serving requests
                    LedgerError::NegativeOpeningBalance { .. } | LedgerError::DuplicateAccount(_) => {
                        tracing::error!("Ledger setup error: {}", ledger_err);
                        (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                    }
                };
                (status, code, ledger_err.details())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = self.status_and_code();

        if status.is_client_error() {
            tracing::debug!(status = %status, error_code, details = ?details, "Request rejected: {}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
