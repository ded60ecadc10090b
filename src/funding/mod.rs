//! Deposit and withdrawal request intake
//!
//! Intake only creates a `Pending` one-sided ledger record; no balance is
//! mutated here. The administrative approval that would move value happens
//! outside this service.

pub mod error;
pub mod handlers;
pub mod service;

pub use error::FundingError;
pub use service::FundingService;
