//! Transfer ledger module
//!
//! Append-only records of value movement: peer-to-peer transfers (written
//! directly as Completed) and funding requests (written as Pending, with
//! only one side of from/to populated).

pub mod models;
pub mod repository;

pub use models::{NewTransferRecord, TransferRecord, TransferStatus, transaction_id};
pub use repository::{LedgerRepository, LedgerStore};
