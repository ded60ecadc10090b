use thiserror::Error;

use crate::account::StoreError;

#[derive(Error, Debug)]
pub enum FundingError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid amount: must be positive")]
    InvalidAmount,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Account is not active")]
    AccountInactive,

    #[error("Transaction PIN not configured")]
    PinNotConfigured,

    #[error("Invalid transaction PIN")]
    InvalidPin,

    #[error("Insufficient balance")]
    InsufficientBalance,
}
