//! Peer-to-peer transfer handler

use axum::{Extension, Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResponse, error_codes};
use crate::auth::Claims;
use crate::transfer::{TransferError, TransferOutcome, TransferRequest};

/// Map a transfer failure to HTTP status + wallet error code.
///
/// Status codes follow the wallet convention: 400 for validation and
/// sufficiency failures, 401 bad PIN, 403 PIN missing or sender frozen,
/// 404 for the recipient-side not-found class, 500 for storage trouble.
pub(crate) fn transfer_error_status(e: &TransferError) -> (StatusCode, i32) {
    match e {
        TransferError::InvalidAmount => (StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER),
        TransferError::SelfTransferNotAllowed => (StatusCode::BAD_REQUEST, error_codes::SELF_TRANSFER),
        TransferError::InsufficientBalance => {
            (StatusCode::BAD_REQUEST, error_codes::INSUFFICIENT_BALANCE)
        }
        TransferError::InvalidPin => (StatusCode::UNAUTHORIZED, error_codes::INVALID_PIN),
        TransferError::PinNotConfigured => (StatusCode::FORBIDDEN, error_codes::PIN_NOT_SET),
        TransferError::SenderInactive => (StatusCode::FORBIDDEN, error_codes::ACCOUNT_INACTIVE),
        TransferError::SenderNotFound | TransferError::RecipientNotFound => {
            (StatusCode::NOT_FOUND, error_codes::ACCOUNT_NOT_FOUND)
        }
        TransferError::RecipientInactive => (StatusCode::NOT_FOUND, error_codes::ACCOUNT_INACTIVE),
        TransferError::Store(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
        ),
        TransferError::TransferFailed(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::TRANSFER_FAILED,
        ),
    }
}

/// Send a transfer to another wallet
///
/// POST /api/v1/transfer
#[utoipa::path(
    post,
    path = "/api/v1/transfer",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transfer completed", body = ApiResponse<TransferOutcome>),
        (status = 400, description = "Invalid amount, self transfer, or insufficient balance"),
        (status = 401, description = "Invalid transaction PIN"),
        (status = 403, description = "Transaction PIN not configured"),
        (status = 404, description = "Recipient wallet not found or inactive"),
        (status = 500, description = "Transfer failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Transfer"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<TransferRequest>,
) -> Result<Json<ApiResponse<TransferOutcome>>, ApiError> {
    let sender_id = claims.account_id();

    match state.transfers.execute(sender_id, req).await {
        Ok(outcome) => Ok(Json(ApiResponse::success(outcome))),
        Err(e) => {
            let (status, code) = transfer_error_status(&e);
            if status.is_server_error() {
                tracing::error!(sender = sender_id, error = %e, "transfer failed");
            } else {
                tracing::warn!(sender = sender_id, kind = e.kind(), "transfer rejected");
            }
            Err(ApiError::new(status, code, e.to_string()))
        }
    }
}
