//! Storage seam for account rows
//!
//! The transfer protocol only talks to this trait. The production
//! implementation is [`super::repository::AccountRepository`] over
//! PostgreSQL; tests substitute an in-memory store with the same
//! compare-and-swap semantics.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use super::models::Account;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Key-value-like access to account rows keyed by account id
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn get_by_id(&self, account_id: i64) -> Result<Option<Account>, StoreError>;

    async fn get_by_wallet_id(&self, wallet_id: &str) -> Result<Option<Account>, StoreError>;

    /// Conditionally update a balance: the write only lands if the stored
    /// balance still equals `expected`. Returns `false` on mismatch so the
    /// caller can re-read and retry instead of overwriting a concurrent
    /// writer's result.
    async fn compare_and_set_balance(
        &self,
        account_id: i64,
        expected: Decimal,
        new_balance: Decimal,
    ) -> Result<bool, StoreError>;

    async fn set_pin_hash(&self, account_id: i64, pin_hash: &str) -> Result<(), StoreError>;
}
