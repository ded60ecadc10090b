//! Account management module
//!
//! PostgreSQL-backed storage for wallet accounts: balance, status, login
//! credentials and the transaction PIN hash.

pub mod models;
pub mod repository;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use models::{Account, AccountStatus};
pub use repository::AccountRepository;
pub use store::{AccountStore, StoreError};
pub use validation::{Pin, ValidationError, WalletId};

// Re-export Database from top-level db module
pub use crate::db::Database;
