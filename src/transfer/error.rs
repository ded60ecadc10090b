use thiserror::Error;

use crate::account::StoreError;

/// Transfer failure taxonomy. Everything except `Store` and
/// `TransferFailed` is rejected before any balance is touched.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid amount: must be positive")]
    InvalidAmount,

    #[error("Sender account not found")]
    SenderNotFound,

    #[error("Sender account is not active")]
    SenderInactive,

    #[error("Recipient wallet not found")]
    RecipientNotFound,

    #[error("Recipient account is not active")]
    RecipientInactive,

    #[error("Sender and recipient are the same account")]
    SelfTransferNotAllowed,

    #[error("Transaction PIN not configured")]
    PinNotConfigured,

    #[error("Invalid transaction PIN")]
    InvalidPin,

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Transfer failed: {0}")]
    TransferFailed(&'static str),
}

impl TransferError {
    /// Stable machine-readable kind, used by tests and logging
    pub fn kind(&self) -> &'static str {
        match self {
            TransferError::Store(_) => "store",
            TransferError::InvalidAmount => "invalid_amount",
            TransferError::SenderNotFound => "sender_not_found",
            TransferError::SenderInactive => "sender_inactive",
            TransferError::RecipientNotFound => "recipient_not_found",
            TransferError::RecipientInactive => "recipient_inactive",
            TransferError::SelfTransferNotAllowed => "self_transfer",
            TransferError::PinNotConfigured => "pin_not_configured",
            TransferError::InvalidPin => "invalid_pin",
            TransferError::InsufficientBalance => "insufficient_balance",
            TransferError::TransferFailed(_) => "transfer_failed",
        }
    }
}
