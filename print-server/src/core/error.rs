use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Printer not connected. Please check USB/Network connection.")]
    PrinterUnavailable(String),

    #[error("Failed to send data to printer")]
    SendFailed(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    /// Human-readable cause; the POS frontend shows this field
    detail: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_type, detail) = match &self {
            ServerError::PrinterUnavailable(cause) => {
                tracing::warn!(cause = %cause, "Printer unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "printer_unavailable",
                    format!("{} ({})", self, cause),
                )
            }
            ServerError::SendFailed(cause) => {
                tracing::error!(cause = %cause, "Print send failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "send_failed",
                    format!("{}: {}", self, cause),
                )
            }
            ServerError::Internal(err) => {
                // Logged in full, not exposed
                tracing::error!(error = ?err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            detail,
        };

        (status, Json(body)).into_response()
    }
}

/// Handler result type
pub type Result<T> = std::result::Result<T, ServerError>;
