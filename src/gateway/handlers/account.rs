//! Account profile and transaction history handlers

use axum::{Extension, Json, extract::Query, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResponse, error_codes};
use crate::account::AccountStatus;
use crate::auth::Claims;
use crate::ledger::{TransferRecord, TransferStatus};

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountView {
    pub account_id: i64,
    pub wallet_id: String,
    pub username: String,
    pub email: String,
    #[schema(example = "1000.00")]
    pub balance: String,
    #[schema(example = "active")]
    pub status: String,
    pub pin_set: bool,
    pub created_at: String,
}

fn status_label(status: AccountStatus) -> &'static str {
    match status {
        AccountStatus::Pending => "pending",
        AccountStatus::Active => "active",
        AccountStatus::Suspended => "suspended",
    }
}

/// Account profile and current balance
///
/// GET /api/v1/account
#[utoipa::path(
    get,
    path = "/api/v1/account",
    responses(
        (status = 200, description = "Account profile", body = ApiResponse<AccountView>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<AccountView>>, ApiError> {
    let account = state
        .accounts
        .get_by_id(claims.account_id())
        .await
        .map_err(|e| {
            tracing::error!("account lookup failed: {}", e);
            ApiError::internal("Account lookup failed")
        })?
        .ok_or_else(|| ApiError::not_found(error_codes::ACCOUNT_NOT_FOUND, "Account not found"))?;

    Ok(Json(ApiResponse::success(AccountView {
        account_id: account.account_id,
        wallet_id: account.wallet_id,
        username: account.username,
        email: account.email,
        balance: format!("{:.2}", account.balance),
        status: status_label(account.status).to_string(),
        pin_set: account.pin_hash.is_some(),
        created_at: account.created_at.to_rfc3339(),
    })))
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct HistoryQuery {
    /// Max records to return (default 50)
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionView {
    pub transaction_id: String,
    /// "transfer", "deposit" or "withdrawal"
    #[schema(example = "transfer")]
    pub kind: String,
    /// "in" or "out" relative to the caller
    #[schema(example = "out")]
    pub direction: String,
    #[schema(example = "100.50")]
    pub amount: String,
    #[schema(example = "completed")]
    pub status: String,
    pub description: Option<String>,
    pub created_at: String,
}

pub(crate) fn transaction_view(record: &TransferRecord, viewer: i64) -> TransactionView {
    let kind = match (record.from_account, record.to_account) {
        (Some(_), Some(_)) => "transfer",
        (None, Some(_)) => "deposit",
        (Some(_), None) => "withdrawal",
        (None, None) => "unknown",
    };
    let direction = if record.from_account == Some(viewer) {
        "out"
    } else {
        "in"
    };
    let status = match record.status {
        TransferStatus::Pending => "pending",
        TransferStatus::Completed => "completed",
        TransferStatus::Failed => "failed",
    };

    TransactionView {
        transaction_id: record.transaction_id.clone(),
        kind: kind.to_string(),
        direction: direction.to_string(),
        amount: format!("{:.2}", record.amount),
        status: status.to_string(),
        description: record.description.clone(),
        created_at: record.created_at.to_rfc3339(),
    }
}

/// Transaction history, newest first
///
/// GET /api/v1/account/transactions
#[utoipa::path(
    get,
    path = "/api/v1/account/transactions",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Transaction history", body = ApiResponse<Vec<TransactionView>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn get_transactions(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<TransactionView>>>, ApiError> {
    let account_id = claims.account_id();
    let limit = query.limit.unwrap_or(50).clamp(1, 200);

    let records = state
        .ledger
        .history_for_account(account_id, limit)
        .await
        .map_err(|e| {
            tracing::error!("history query failed: {}", e);
            ApiError::internal("History query failed")
        })?;

    let views = records
        .iter()
        .map(|r| transaction_view(r, account_id))
        .collect();

    Ok(Json(ApiResponse::success(views)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn record(from: Option<i64>, to: Option<i64>, status: TransferStatus) -> TransferRecord {
        TransferRecord {
            transaction_id: "TXN-TEST".to_string(),
            from_account: from,
            to_account: to,
            amount: Decimal::new(10050, 2),
            status,
            description: None,
            client_ref: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_transaction_view_kinds() {
        let v = transaction_view(&record(Some(1), Some(2), TransferStatus::Completed), 1);
        assert_eq!(v.kind, "transfer");
        assert_eq!(v.direction, "out");

        let v = transaction_view(&record(Some(1), Some(2), TransferStatus::Completed), 2);
        assert_eq!(v.direction, "in");

        let v = transaction_view(&record(None, Some(2), TransferStatus::Pending), 2);
        assert_eq!(v.kind, "deposit");
        assert_eq!(v.status, "pending");

        let v = transaction_view(&record(Some(1), None, TransferStatus::Pending), 1);
        assert_eq!(v.kind, "withdrawal");
        assert_eq!(v.direction, "out");
    }

    #[test]
    fn test_transaction_view_amount_formatting() {
        let v = transaction_view(&record(Some(1), Some(2), TransferStatus::Completed), 1);
        assert_eq!(v.amount, "100.50");
    }
}
