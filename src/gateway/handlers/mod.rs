//! Gateway HTTP handlers

pub mod account;
pub mod health;
pub mod transfer;

pub use account::{AccountView, TransactionView, get_account, get_transactions};
pub use health::{HealthResponse, health_check};
pub use transfer::create_transfer;
