//! The balance-mutation protocol
//!
//! Sequential, two-write transfer: debit the sender, credit the recipient,
//! append the ledger record, notify. Both balance writes are conditional
//! updates keyed on the previously observed balance, so a concurrent writer
//! causes a bounded re-read-and-retry instead of a lost update. The two
//! writes are still independent statements: if the credit cannot land, a
//! single compensating credit back to the sender is attempted, and every
//! partial-failure surface is logged with enough detail for forensic
//! reconstruction.

use rust_decimal::Decimal;
use std::sync::Arc;

use super::error::TransferError;
use super::types::{RecipientInfo, TransferOutcome, TransferRequest};
use crate::account::{Account, AccountStore, StoreError, WalletId};
use crate::auth::PinVerifier;
use crate::gateway::types::normalize_amount;
use crate::ledger::{LedgerStore, NewTransferRecord, TransferRecord, TransferStatus, transaction_id};
use crate::notify::{Notifier, TransferNotice};

/// Attempts per conditional balance write before giving up on contention
pub const MAX_CAS_ATTEMPTS: u32 = 3;

pub struct TransferService {
    accounts: Arc<dyn AccountStore>,
    ledger: Arc<dyn LedgerStore>,
    pin_verifier: Arc<dyn PinVerifier>,
    notifier: Arc<dyn Notifier>,
}

impl TransferService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        ledger: Arc<dyn LedgerStore>,
        pin_verifier: Arc<dyn PinVerifier>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            accounts,
            ledger,
            pin_verifier,
            notifier,
        }
    }

    /// Execute a peer-to-peer transfer.
    ///
    /// Validation is fail-fast and touches no state; the first write is the
    /// sender debit. Returns the ledger transaction id and the sender's
    /// post-debit balance.
    pub async fn execute(
        &self,
        sender_id: i64,
        req: TransferRequest,
    ) -> Result<TransferOutcome, TransferError> {
        // 1. Validate amount (positive, 2 fraction digits, banker's rounding)
        let amount =
            normalize_amount(req.amount.inner()).map_err(|_| TransferError::InvalidAmount)?;

        // 2. Resolve both accounts
        let sender = self
            .accounts
            .get_by_id(sender_id)
            .await?
            .ok_or(TransferError::SenderNotFound)?;

        let recipient_wallet =
            WalletId::new(&req.recipient_wallet_id).map_err(|_| TransferError::RecipientNotFound)?;
        let recipient = self
            .accounts
            .get_by_wallet_id(recipient_wallet.as_str())
            .await?
            .ok_or(TransferError::RecipientNotFound)?;

        if sender.account_id == recipient.account_id {
            return Err(TransferError::SelfTransferNotAllowed);
        }
        if !sender.is_active() {
            return Err(TransferError::SenderInactive);
        }
        if !recipient.is_active() {
            return Err(TransferError::RecipientInactive);
        }

        // 3. Verify the transaction PIN
        let pin_hash = sender
            .pin_hash
            .as_deref()
            .ok_or(TransferError::PinNotConfigured)?;
        if !self.pin_verifier.verify(&req.pin, pin_hash) {
            return Err(TransferError::InvalidPin);
        }

        // 4. Idempotent replay: a cid we have already completed returns the
        // stored outcome without moving value again
        if let Some(cid) = req.cid.as_deref() {
            if let Some(existing) = self.ledger.find_by_client_ref(sender_id, cid).await? {
                return self.replay_outcome(sender_id, existing, &recipient).await;
            }
        }

        // 5. Sufficiency check against the balance read at the start
        if sender.balance < amount {
            return Err(TransferError::InsufficientBalance);
        }

        // 6. Debit sender (conditional write, bounded retry)
        let new_sender_balance = self
            .debit_sender(&sender, amount)
            .await?;

        // 7. Credit recipient; on failure, compensate the debit
        if let Err(e) = self.credit_recipient(&recipient, amount).await {
            self.compensate_sender(sender_id, amount, &e).await;
            return Err(e);
        }

        // 8. Append the ledger record. Balances have already moved; an
        // append failure leaves the transfer economically complete but
        // invisible to history, so it is logged loudly and surfaced.
        let txid = transaction_id("TXN");
        let record = NewTransferRecord {
            transaction_id: txid.clone(),
            from_account: Some(sender.account_id),
            to_account: Some(recipient.account_id),
            amount,
            status: TransferStatus::Completed,
            description: req.note.clone(),
            client_ref: req.cid.clone(),
        };
        if let Err(e) = self.ledger.append(record).await {
            tracing::error!(
                transaction_id = %txid,
                from = sender.account_id,
                to = recipient.account_id,
                %amount,
                error = %e,
                "LEDGER APPEND FAILED after balance mutation; transfer has no history record"
            );
            return Err(TransferError::TransferFailed("ledger append failed"));
        }

        tracing::info!(
            transaction_id = %txid,
            from = sender.account_id,
            to = recipient.account_id,
            %amount,
            "transfer completed"
        );

        // 9. Best-effort notifications, detached from the request path
        self.dispatch_notifications(&sender, &recipient, amount, &txid);

        Ok(TransferOutcome {
            transaction_id: txid,
            new_balance: format!("{:.2}", new_sender_balance),
            recipient: RecipientInfo {
                name: recipient.username.clone(),
                wallet_id: recipient.wallet_id.clone(),
            },
        })
    }

    /// Conditional debit with bounded retry. Re-reads and re-checks
    /// sufficiency after every lost race; two concurrent debits can
    /// therefore never both pass the check against the same stale balance.
    async fn debit_sender(
        &self,
        sender: &Account,
        amount: Decimal,
    ) -> Result<Decimal, TransferError> {
        let mut observed = sender.balance;
        for attempt in 0..MAX_CAS_ATTEMPTS {
            let new_balance = observed - amount;
            if self
                .accounts
                .compare_and_set_balance(sender.account_id, observed, new_balance)
                .await?
            {
                return Ok(new_balance);
            }

            tracing::debug!(
                account = sender.account_id,
                attempt,
                "debit write lost a race, re-reading balance"
            );
            observed = self
                .accounts
                .get_by_id(sender.account_id)
                .await?
                .ok_or(TransferError::SenderNotFound)?
                .balance;
            if observed < amount {
                return Err(TransferError::InsufficientBalance);
            }
        }
        Err(TransferError::TransferFailed("sender debit contention"))
    }

    /// Conditional credit with bounded retry. No sufficiency check; only
    /// contention or storage failure can stop it.
    async fn credit_recipient(
        &self,
        recipient: &Account,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        let mut observed = recipient.balance;
        for attempt in 0..MAX_CAS_ATTEMPTS {
            if self
                .accounts
                .compare_and_set_balance(recipient.account_id, observed, observed + amount)
                .await?
            {
                return Ok(());
            }

            tracing::debug!(
                account = recipient.account_id,
                attempt,
                "credit write lost a race, re-reading balance"
            );
            observed = self
                .accounts
                .get_by_id(recipient.account_id)
                .await?
                .ok_or(TransferError::RecipientNotFound)?
                .balance;
        }
        Err(TransferError::TransferFailed("recipient credit contention"))
    }

    /// Undo a debit whose matching credit failed: one best-effort credit
    /// back to the sender. A failure here strands the debit; there is no
    /// automatic reconciliation, only the forensic log line.
    async fn compensate_sender(&self, sender_id: i64, amount: Decimal, cause: &TransferError) {
        tracing::warn!(
            account = sender_id,
            %amount,
            cause = %cause,
            "recipient credit failed, compensating sender debit"
        );

        let result: Result<(), StoreError> = async {
            let mut observed = match self.accounts.get_by_id(sender_id).await? {
                Some(account) => account.balance,
                None => return Err(StoreError::Backend("sender row vanished".to_string())),
            };
            for _ in 0..MAX_CAS_ATTEMPTS {
                if self
                    .accounts
                    .compare_and_set_balance(sender_id, observed, observed + amount)
                    .await?
                {
                    return Ok(());
                }
                observed = match self.accounts.get_by_id(sender_id).await? {
                    Some(account) => account.balance,
                    None => return Err(StoreError::Backend("sender row vanished".to_string())),
                };
            }
            Err(StoreError::Backend("compensation contention".to_string()))
        }
        .await;

        match result {
            Ok(()) => tracing::info!(account = sender_id, %amount, "sender debit compensated"),
            Err(e) => tracing::error!(
                account = sender_id,
                %amount,
                error = %e,
                "COMPENSATION FAILED: sender debited without matching credit"
            ),
        }
    }

    /// Replay path for a previously completed cid: no balance movement,
    /// the stored record's id plus the sender's current balance.
    async fn replay_outcome(
        &self,
        sender_id: i64,
        existing: TransferRecord,
        recipient: &Account,
    ) -> Result<TransferOutcome, TransferError> {
        tracing::info!(
            transaction_id = %existing.transaction_id,
            from = sender_id,
            "duplicate cid, returning stored outcome"
        );

        let balance = self
            .accounts
            .get_by_id(sender_id)
            .await?
            .ok_or(TransferError::SenderNotFound)?
            .balance;

        Ok(TransferOutcome {
            transaction_id: existing.transaction_id,
            new_balance: format!("{:.2}", balance),
            recipient: RecipientInfo {
                name: recipient.username.clone(),
                wallet_id: recipient.wallet_id.clone(),
            },
        })
    }

    fn dispatch_notifications(
        &self,
        sender: &Account,
        recipient: &Account,
        amount: Decimal,
        txid: &str,
    ) {
        let amount_str = format!("{:.2}", amount);

        let notice = TransferNotice {
            email: sender.email.clone(),
            name: sender.username.clone(),
            counterparty: recipient.username.clone(),
            amount: amount_str.clone(),
            transaction_id: txid.to_string(),
        };
        let notifier = self.notifier.clone();
        tokio::spawn(async move { notifier.transfer_sent(&notice).await });

        let notice = TransferNotice {
            email: recipient.email.clone(),
            name: recipient.username.clone(),
            counterparty: sender.username.clone(),
            amount: amount_str,
            transaction_id: txid.to_string(),
        };
        let notifier = self.notifier.clone();
        tokio::spawn(async move { notifier.transfer_received(&notice).await });
    }
}
