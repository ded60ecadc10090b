//! Peer-to-peer balance transfer service
//!
//! The core of the wallet: validates a transfer, verifies the sender's PIN,
//! moves value between two account rows with conditional (compare-and-swap)
//! updates, appends the ledger record and fires best-effort notifications.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod integration_tests;

pub use error::TransferError;
pub use service::{TransferService, MAX_CAS_ATTEMPTS};
pub use types::{RecipientInfo, TransferOutcome, TransferRequest};
