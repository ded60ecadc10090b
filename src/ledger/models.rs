//! Ledger record models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle of a ledger record
///
/// Peer-to-peer transfers are appended directly as `Completed`. Funding
/// requests start as `Pending`; the administrative transition to
/// `Completed`/`Failed` happens outside this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum TransferStatus {
    Pending = 0,
    Completed = 1,
    Failed = 2,
}

impl From<i16> for TransferStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => TransferStatus::Completed,
            2 => TransferStatus::Failed,
            _ => TransferStatus::Pending,
        }
    }
}

/// Immutable movement record. `from_account` is None for deposits,
/// `to_account` is None for withdrawals.
#[derive(Debug, Clone)]
pub struct TransferRecord {
    pub transaction_id: String,
    pub from_account: Option<i64>,
    pub to_account: Option<i64>,
    pub amount: Decimal,
    pub status: TransferStatus,
    pub description: Option<String>,
    /// Caller-supplied idempotency key, unique per sending account
    pub client_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Record to append; `transaction_id` is assigned by the caller via
/// [`transaction_id`], `created_at` by the store.
#[derive(Debug, Clone)]
pub struct NewTransferRecord {
    pub transaction_id: String,
    pub from_account: Option<i64>,
    pub to_account: Option<i64>,
    pub amount: Decimal,
    pub status: TransferStatus,
    pub description: Option<String>,
    pub client_ref: Option<String>,
}

/// Generate a human-presentable transaction id: a short kind prefix plus a
/// ULID (millisecond timestamp + random suffix, lexically sortable).
///
/// Prefixes in use: `TXN` (transfer), `DEP` (deposit request), `WDR`
/// (withdrawal request).
pub fn transaction_id(prefix: &str) -> String {
    format!("{}-{}", prefix, ulid::Ulid::new())
}
