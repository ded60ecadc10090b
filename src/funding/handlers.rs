//! Funding request intake handlers

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::error::FundingError;
use crate::auth::Claims;
use crate::gateway::types::{ApiError, ApiResponse, StrictAmount, error_codes};
use crate::gateway::state::AppState;
use crate::ledger::TransferRecord;

// --- Requests ---

#[derive(Debug, Deserialize, ToSchema)]
pub struct DepositRequest {
    #[schema(value_type = String, example = "250.00")]
    pub amount: StrictAmount,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct WithdrawRequest {
    #[schema(value_type = String, example = "100.00")]
    pub amount: StrictAmount,
    #[schema(example = "4931")]
    pub pin: String,
    pub note: Option<String>,
}

// --- Responses ---

#[derive(Debug, Serialize, ToSchema)]
pub struct FundingRequestView {
    pub transaction_id: String,
    #[schema(example = "pending")]
    pub status: String,
    #[schema(example = "250.00")]
    pub amount: String,
}

impl From<TransferRecord> for FundingRequestView {
    fn from(record: TransferRecord) -> Self {
        Self {
            transaction_id: record.transaction_id,
            status: "pending".to_string(),
            amount: format!("{:.2}", record.amount),
        }
    }
}

fn funding_error_status(e: &FundingError) -> (StatusCode, i32) {
    match e {
        FundingError::InvalidAmount => (StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER),
        FundingError::InsufficientBalance => {
            (StatusCode::BAD_REQUEST, error_codes::INSUFFICIENT_BALANCE)
        }
        FundingError::InvalidPin => (StatusCode::UNAUTHORIZED, error_codes::INVALID_PIN),
        FundingError::PinNotConfigured => (StatusCode::FORBIDDEN, error_codes::PIN_NOT_SET),
        FundingError::AccountInactive => (StatusCode::FORBIDDEN, error_codes::ACCOUNT_INACTIVE),
        FundingError::AccountNotFound => (StatusCode::NOT_FOUND, error_codes::ACCOUNT_NOT_FOUND),
        FundingError::Store(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
        ),
    }
}

fn funding_error(e: FundingError) -> ApiError {
    let (status, code) = funding_error_status(&e);
    if status.is_server_error() {
        tracing::error!(error = %e, "funding request failed");
    }
    ApiError::new(status, code, e.to_string())
}

// --- Handlers ---

/// File a deposit request
///
/// POST /api/v1/funding/deposit
#[utoipa::path(
    post,
    path = "/api/v1/funding/deposit",
    request_body = DepositRequest,
    responses(
        (status = 201, description = "Deposit request filed", body = ApiResponse<FundingRequestView>),
        (status = 400, description = "Invalid amount"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Account not active")
    ),
    security(("bearer_auth" = [])),
    tag = "Funding"
)]
pub async fn request_deposit(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<DepositRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FundingRequestView>>), ApiError> {
    let record = state
        .funding
        .request_deposit(claims.account_id(), req.amount, req.note)
        .await
        .map_err(funding_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(record.into())),
    ))
}

/// File a withdrawal request
///
/// POST /api/v1/funding/withdraw
#[utoipa::path(
    post,
    path = "/api/v1/funding/withdraw",
    request_body = WithdrawRequest,
    responses(
        (status = 201, description = "Withdrawal request filed", body = ApiResponse<FundingRequestView>),
        (status = 400, description = "Invalid amount or insufficient balance"),
        (status = 401, description = "Invalid transaction PIN"),
        (status = 403, description = "PIN not configured or account not active")
    ),
    security(("bearer_auth" = [])),
    tag = "Funding"
)]
pub async fn request_withdrawal(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<WithdrawRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FundingRequestView>>), ApiError> {
    let record = state
        .funding
        .request_withdrawal(claims.account_id(), req.amount, &req.pin, req.note)
        .await
        .map_err(funding_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(record.into())),
    ))
}
