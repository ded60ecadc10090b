//! End-to-end tests of the balance-mutation protocol against in-memory
//! stores with the same compare-and-swap semantics as the PostgreSQL
//! repositories, plus failure injection for the partial-failure paths.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use super::service::TransferService;
use super::types::TransferRequest;
use crate::account::{Account, AccountStatus, AccountStore, StoreError};
use crate::auth::PinVerifier;
use crate::gateway::types::StrictAmount;
use crate::ledger::{LedgerStore, NewTransferRecord, TransferRecord, TransferStatus};
use crate::notify::NoopNotifier;

// ============================================================================
// In-memory stores
// ============================================================================

#[derive(Default)]
struct MemoryAccounts {
    rows: Mutex<HashMap<i64, Account>>,
    /// When set to an account id, CAS writes against that account fail
    fail_cas_for: AtomicI64,
}

impl MemoryAccounts {
    async fn insert(&self, account: Account) {
        self.rows.lock().await.insert(account.account_id, account);
    }

    async fn balance_of(&self, account_id: i64) -> Decimal {
        self.rows.lock().await[&account_id].balance
    }

    fn inject_cas_failure(&self, account_id: i64) {
        self.fail_cas_for.store(account_id, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl AccountStore for MemoryAccounts {
    async fn get_by_id(&self, account_id: i64) -> Result<Option<Account>, StoreError> {
        Ok(self.rows.lock().await.get(&account_id).cloned())
    }

    async fn get_by_wallet_id(&self, wallet_id: &str) -> Result<Option<Account>, StoreError> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .find(|a| a.wallet_id == wallet_id)
            .cloned())
    }

    async fn compare_and_set_balance(
        &self,
        account_id: i64,
        expected: Decimal,
        new_balance: Decimal,
    ) -> Result<bool, StoreError> {
        if self.fail_cas_for.load(Ordering::SeqCst) == account_id {
            return Err(StoreError::Backend("injected write failure".to_string()));
        }

        let mut rows = self.rows.lock().await;
        let account = rows
            .get_mut(&account_id)
            .ok_or_else(|| StoreError::Backend("no such account".to_string()))?;
        if account.balance != expected {
            return Ok(false);
        }
        account.balance = new_balance;
        Ok(true)
    }

    async fn set_pin_hash(&self, account_id: i64, pin_hash: &str) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().await;
        let account = rows
            .get_mut(&account_id)
            .ok_or_else(|| StoreError::Backend("no such account".to_string()))?;
        account.pin_hash = Some(pin_hash.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct MemoryLedger {
    records: Mutex<Vec<TransferRecord>>,
    fail_append: AtomicBool,
}

impl MemoryLedger {
    async fn completed_count(&self) -> usize {
        self.records
            .lock()
            .await
            .iter()
            .filter(|r| r.status == TransferStatus::Completed)
            .count()
    }

    fn fail_next_append(&self) {
        self.fail_append.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl LedgerStore for MemoryLedger {
    async fn append(&self, record: NewTransferRecord) -> Result<TransferRecord, StoreError> {
        if self.fail_append.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Backend("injected append failure".to_string()));
        }

        let stored = TransferRecord {
            transaction_id: record.transaction_id,
            from_account: record.from_account,
            to_account: record.to_account,
            amount: record.amount,
            status: record.status,
            description: record.description,
            client_ref: record.client_ref,
            created_at: Utc::now(),
        };
        self.records.lock().await.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_client_ref(
        &self,
        from_account: i64,
        client_ref: &str,
    ) -> Result<Option<TransferRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .find(|r| r.from_account == Some(from_account) && r.client_ref.as_deref() == Some(client_ref))
            .cloned())
    }

    async fn history_for_account(
        &self,
        account_id: i64,
        limit: i64,
    ) -> Result<Vec<TransferRecord>, StoreError> {
        let mut records: Vec<TransferRecord> = self
            .records
            .lock()
            .await
            .iter()
            .filter(|r| r.from_account == Some(account_id) || r.to_account == Some(account_id))
            .cloned()
            .collect();
        records.reverse();
        records.truncate(limit as usize);
        Ok(records)
    }
}

/// Deterministic PIN check; the argon2 implementation has its own tests
struct PlainPin;

impl PinVerifier for PlainPin {
    fn hash(&self, pin: &crate::account::Pin) -> anyhow::Result<String> {
        Ok(format!("plain:{}", pin.as_str()))
    }

    fn verify(&self, pin: &str, stored_hash: &str) -> bool {
        stored_hash == format!("plain:{}", pin)
    }
}

// ============================================================================
// Fixture
// ============================================================================

const SENDER: i64 = 1;
const RECIPIENT: i64 = 2;
const SENDER_WALLET: &str = "WLT-SENDER0001";
const RECIPIENT_WALLET: &str = "WLT-RECIP00001";

fn account(id: i64, wallet: &str, balance: &str, status: AccountStatus, pin: Option<&str>) -> Account {
    Account {
        account_id: id,
        wallet_id: wallet.to_string(),
        username: format!("user{}", id),
        email: format!("user{}@example.com", id),
        password_hash: "plain:password".to_string(),
        pin_hash: pin.map(|p| format!("plain:{}", p)),
        balance: balance.parse().unwrap(),
        status,
        created_at: Utc::now(),
    }
}

struct Fixture {
    accounts: Arc<MemoryAccounts>,
    ledger: Arc<MemoryLedger>,
    service: TransferService,
}

async fn fixture(sender_balance: &str, recipient_balance: &str) -> Fixture {
    let accounts = Arc::new(MemoryAccounts::default());
    accounts
        .insert(account(
            SENDER,
            SENDER_WALLET,
            sender_balance,
            AccountStatus::Active,
            Some("4931"),
        ))
        .await;
    accounts
        .insert(account(
            RECIPIENT,
            RECIPIENT_WALLET,
            recipient_balance,
            AccountStatus::Active,
            Some("1111"),
        ))
        .await;

    let ledger = Arc::new(MemoryLedger::default());
    let service = TransferService::new(
        accounts.clone(),
        ledger.clone(),
        Arc::new(PlainPin),
        Arc::new(NoopNotifier),
    );

    Fixture {
        accounts,
        ledger,
        service,
    }
}

fn request(wallet: &str, amount: &str, pin: &str) -> TransferRequest {
    TransferRequest {
        recipient_wallet_id: wallet.to_string(),
        amount: StrictAmount::from_decimal(amount.parse().unwrap()),
        note: None,
        pin: pin.to_string(),
        cid: None,
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn test_transfer_moves_exact_amount() {
    let fx = fixture("1000.00", "50.00").await;

    let outcome = fx
        .service
        .execute(SENDER, request(RECIPIENT_WALLET, "100", "4931"))
        .await
        .expect("transfer should succeed");

    assert!(outcome.transaction_id.starts_with("TXN-"));
    assert_eq!(outcome.new_balance, "900.00");
    assert_eq!(outcome.recipient.wallet_id, RECIPIENT_WALLET);

    assert_eq!(fx.accounts.balance_of(SENDER).await, dec("900.00"));
    assert_eq!(fx.accounts.balance_of(RECIPIENT).await, dec("150.00"));

    // exactly one completed ledger record with the transferred amount
    let records = fx.ledger.records.lock().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, TransferStatus::Completed);
    assert_eq!(records[0].amount, dec("100"));
    assert_eq!(records[0].from_account, Some(SENDER));
    assert_eq!(records[0].to_account, Some(RECIPIENT));
}

#[tokio::test]
async fn test_transfer_amount_is_rounded_half_even() {
    let fx = fixture("1000.00", "0.00").await;

    fx.service
        .execute(SENDER, request(RECIPIENT_WALLET, "10.125", "4931"))
        .await
        .expect("transfer should succeed");

    // 10.125 rounds to 10.12 under banker's rounding
    assert_eq!(fx.accounts.balance_of(RECIPIENT).await, dec("10.12"));
    assert_eq!(fx.accounts.balance_of(SENDER).await, dec("989.88"));
}

// ============================================================================
// Fail-fast validation: no state changes
// ============================================================================

async fn assert_untouched(fx: &Fixture, sender_balance: &str, recipient_balance: &str) {
    assert_eq!(fx.accounts.balance_of(SENDER).await, dec(sender_balance));
    assert_eq!(fx.accounts.balance_of(RECIPIENT).await, dec(recipient_balance));
    assert_eq!(fx.ledger.records.lock().await.len(), 0);
}

#[tokio::test]
async fn test_zero_amount_rejected() {
    let fx = fixture("1000.00", "50.00").await;

    let err = fx
        .service
        .execute(SENDER, request(RECIPIENT_WALLET, "0", "4931"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "invalid_amount");
    assert_untouched(&fx, "1000.00", "50.00").await;
}

#[tokio::test]
async fn test_insufficient_balance_rejected() {
    let fx = fixture("50.00", "0.00").await;

    let err = fx
        .service
        .execute(SENDER, request(RECIPIENT_WALLET, "100", "4931"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "insufficient_balance");
    assert_untouched(&fx, "50.00", "0.00").await;
}

#[tokio::test]
async fn test_self_transfer_rejected() {
    let fx = fixture("1000.00", "50.00").await;

    let err = fx
        .service
        .execute(SENDER, request(SENDER_WALLET, "100", "4931"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "self_transfer");
    assert_untouched(&fx, "1000.00", "50.00").await;
}

#[tokio::test]
async fn test_unknown_recipient_rejected() {
    let fx = fixture("1000.00", "50.00").await;

    let err = fx
        .service
        .execute(SENDER, request("WLT-NOSUCHID01", "100", "4931"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "recipient_not_found");

    // malformed wallet ids are indistinguishable from unknown ones
    let err = fx
        .service
        .execute(SENDER, request("not-a-wallet-id", "100", "4931"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "recipient_not_found");
    assert_untouched(&fx, "1000.00", "50.00").await;
}

#[tokio::test]
async fn test_suspended_recipient_rejected() {
    let fx = fixture("1000.00", "50.00").await;
    fx.accounts
        .insert(account(
            3,
            "WLT-FROZEN0001",
            "0.00",
            AccountStatus::Suspended,
            None,
        ))
        .await;

    let err = fx
        .service
        .execute(SENDER, request("WLT-FROZEN0001", "100", "4931"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "recipient_inactive");
    assert_eq!(fx.accounts.balance_of(SENDER).await, dec("1000.00"));
}

#[tokio::test]
async fn test_missing_pin_rejected() {
    let fx = fixture("1000.00", "50.00").await;
    fx.accounts
        .insert(account(
            4,
            "WLT-NOPIN00001",
            "500.00",
            AccountStatus::Active,
            None,
        ))
        .await;

    let err = fx
        .service
        .execute(4, request(RECIPIENT_WALLET, "100", "4931"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "pin_not_configured");
    assert_eq!(fx.accounts.balance_of(4).await, dec("500.00"));
}

#[tokio::test]
async fn test_wrong_pin_rejected() {
    let fx = fixture("1000.00", "50.00").await;

    let err = fx
        .service
        .execute(SENDER, request(RECIPIENT_WALLET, "100", "0000"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "invalid_pin");
    assert_untouched(&fx, "1000.00", "50.00").await;
}

#[tokio::test]
async fn test_rejection_is_idempotent() {
    let fx = fixture("1000.00", "50.00").await;

    // same invalid input twice yields the same kind; no hidden mutation
    for _ in 0..2 {
        let err = fx
            .service
            .execute(SENDER, request(RECIPIENT_WALLET, "-5", "4931"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_amount");
    }
    assert_untouched(&fx, "1000.00", "50.00").await;
}

// ============================================================================
// Partial failures
// ============================================================================

#[tokio::test]
async fn test_credit_failure_compensates_sender() {
    let fx = fixture("1000.00", "50.00").await;
    fx.accounts.inject_cas_failure(RECIPIENT);

    let err = fx
        .service
        .execute(SENDER, request(RECIPIENT_WALLET, "100", "4931"))
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), "store" | "transfer_failed"));

    // the debit was undone, the recipient never credited, nothing logged
    assert_untouched(&fx, "1000.00", "50.00").await;
}

#[tokio::test]
async fn test_ledger_append_failure_is_surfaced_but_balances_stand() {
    let fx = fixture("1000.00", "50.00").await;
    fx.ledger.fail_next_append();

    let err = fx
        .service
        .execute(SENDER, request(RECIPIENT_WALLET, "100", "4931"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "transfer_failed");

    // the transfer is economically complete: both balances moved, but the
    // ledger has no record of it
    assert_eq!(fx.accounts.balance_of(SENDER).await, dec("900.00"));
    assert_eq!(fx.accounts.balance_of(RECIPIENT).await, dec("150.00"));
    assert_eq!(fx.ledger.records.lock().await.len(), 0);
}

// ============================================================================
// Idempotent replay
// ============================================================================

#[tokio::test]
async fn test_duplicate_cid_returns_stored_outcome() {
    let fx = fixture("1000.00", "50.00").await;

    let mut req1 = request(RECIPIENT_WALLET, "100", "4931");
    req1.cid = Some("order-42".to_string());
    let first = fx.service.execute(SENDER, req1).await.unwrap();

    let mut req2 = request(RECIPIENT_WALLET, "100", "4931");
    req2.cid = Some("order-42".to_string());
    let second = fx.service.execute(SENDER, req2).await.unwrap();

    assert_eq!(first.transaction_id, second.transaction_id);
    // value moved exactly once
    assert_eq!(fx.accounts.balance_of(SENDER).await, dec("900.00"));
    assert_eq!(fx.accounts.balance_of(RECIPIENT).await, dec("150.00"));
    assert_eq!(fx.ledger.completed_count().await, 1);
}

// ============================================================================
// Concurrency: the lost-update fix
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_debits_cannot_both_spend_the_same_balance() {
    // Sender holds exactly 100; two concurrent transfers of 100 each. The
    // conditional balance writes guarantee at most one can land.
    let fx = fixture("100.00", "0.00").await;
    fx.accounts
        .insert(account(
            5,
            "WLT-OTHER00001",
            "0.00",
            AccountStatus::Active,
            None,
        ))
        .await;

    let service = Arc::new(fx.service);
    let a = {
        let service = service.clone();
        tokio::spawn(async move {
            service
                .execute(SENDER, request(RECIPIENT_WALLET, "100", "4931"))
                .await
        })
    };
    let b = {
        let service = service.clone();
        tokio::spawn(async move {
            service
                .execute(SENDER, request("WLT-OTHER00001", "100", "4931"))
                .await
        })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();

    assert_eq!(successes, 1, "exactly one of two concurrent spends may win");
    assert_eq!(fx.accounts.balance_of(SENDER).await, dec("0.00"));

    // the credited total equals the single debit
    let credited = fx.accounts.balance_of(RECIPIENT).await + fx.accounts.balance_of(5).await;
    assert_eq!(credited, dec("100.00"));
    assert_eq!(fx.ledger.completed_count().await, 1);
}
