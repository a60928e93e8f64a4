//! Print API Handlers

use axum::{Json, extract::State};
use pos_printer::ConnectionKind;
use serde::Serialize;

use crate::core::{Result, ServerState};
use crate::printing::{PrintOutcome, PrinterStatus, ReceiptRequest};

/// Successful print response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintResponse {
    pub success: bool,
    pub message: &'static str,
    pub bill_number: String,
    pub connection_type: ConnectionKind,
}

impl PrintResponse {
    fn from_outcome(outcome: PrintOutcome, message: &'static str) -> Self {
        Self {
            success: true,
            message,
            bill_number: outcome.bill_number,
            connection_type: outcome.connection,
        }
    }
}

/// POST /api/print/receipt - print one kitchen receipt
pub async fn print_receipt(
    State(state): State<ServerState>,
    Json(receipt): Json<ReceiptRequest>,
) -> Result<Json<PrintResponse>> {
    let outcome = state.print_service.print_receipt(&receipt).await?;
    Ok(Json(PrintResponse::from_outcome(
        outcome,
        "Receipt printed successfully",
    )))
}

/// GET /api/print/status - printer link status
pub async fn status(State(state): State<ServerState>) -> Json<PrinterStatus> {
    Json(state.print_service.status().await)
}

/// POST /api/print/test - print the canned test receipt
pub async fn test_print(State(state): State<ServerState>) -> Result<Json<PrintResponse>> {
    let outcome = state.print_service.test_print().await?;
    Ok(Json(PrintResponse::from_outcome(
        outcome,
        "Test print successful",
    )))
}
