//! Data models for wallet accounts

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Account status
///
/// Only `Active` accounts may send or receive transfers. `Pending` is the
/// state before first activation; `Suspended` accounts keep their balance
/// and history but are frozen (soft-deactivation — rows referenced by
/// transfer records are never deleted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum AccountStatus {
    Pending = 0,
    Active = 1,
    Suspended = 2,
}

impl From<i16> for AccountStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => AccountStatus::Active,
            2 => AccountStatus::Suspended,
            _ => AccountStatus::Pending,
        }
    }
}

/// A balance-holding wallet account
#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: i64,
    pub wallet_id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    /// Unset until the user configures a transaction PIN
    pub pin_hash: Option<String>,
    pub balance: Decimal,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    pub fn has_pin(&self) -> bool {
        self.pin_hash.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_status_from_i16() {
        assert_eq!(AccountStatus::from(0), AccountStatus::Pending);
        assert_eq!(AccountStatus::from(1), AccountStatus::Active);
        assert_eq!(AccountStatus::from(2), AccountStatus::Suspended);
        assert_eq!(AccountStatus::from(99), AccountStatus::Pending); // unknown maps to Pending
    }

    #[test]
    fn test_account_predicates() {
        let account = Account {
            account_id: 1,
            wallet_id: "WLT-AB12CD34EF".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            pin_hash: None,
            balance: Decimal::ZERO,
            status: AccountStatus::Active,
            created_at: Utc::now(),
        };

        assert!(account.is_active());
        assert!(!account.has_pin());
    }
}
