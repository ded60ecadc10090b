use std::sync::Arc;

use super::error::FundingError;
use crate::account::{Account, AccountStore};
use crate::auth::PinVerifier;
use crate::gateway::types::{StrictAmount, normalize_amount};
use crate::ledger::{LedgerStore, NewTransferRecord, TransferRecord, TransferStatus, transaction_id};

pub struct FundingService {
    accounts: Arc<dyn AccountStore>,
    ledger: Arc<dyn LedgerStore>,
    pin_verifier: Arc<dyn PinVerifier>,
}

impl FundingService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        ledger: Arc<dyn LedgerStore>,
        pin_verifier: Arc<dyn PinVerifier>,
    ) -> Self {
        Self {
            accounts,
            ledger,
            pin_verifier,
        }
    }

    async fn active_account(&self, account_id: i64) -> Result<Account, FundingError> {
        let account = self
            .accounts
            .get_by_id(account_id)
            .await?
            .ok_or(FundingError::AccountNotFound)?;
        if !account.is_active() {
            return Err(FundingError::AccountInactive);
        }
        Ok(account)
    }

    /// File a deposit request: Pending record, to_account populated,
    /// from_account NULL
    pub async fn request_deposit(
        &self,
        account_id: i64,
        amount: StrictAmount,
        note: Option<String>,
    ) -> Result<TransferRecord, FundingError> {
        let amount = normalize_amount(amount.inner()).map_err(|_| FundingError::InvalidAmount)?;
        let account = self.active_account(account_id).await?;

        let record = self
            .ledger
            .append(NewTransferRecord {
                transaction_id: transaction_id("DEP"),
                from_account: None,
                to_account: Some(account.account_id),
                amount,
                status: TransferStatus::Pending,
                description: note,
                client_ref: None,
            })
            .await?;

        tracing::info!(
            transaction_id = %record.transaction_id,
            account = account.account_id,
            %amount,
            "deposit request filed"
        );
        Ok(record)
    }

    /// File a withdrawal request: PIN-verified, sufficiency checked
    /// read-only, Pending record with from_account populated and
    /// to_account NULL. The balance is untouched until approval.
    pub async fn request_withdrawal(
        &self,
        account_id: i64,
        amount: StrictAmount,
        pin: &str,
        note: Option<String>,
    ) -> Result<TransferRecord, FundingError> {
        let amount = normalize_amount(amount.inner()).map_err(|_| FundingError::InvalidAmount)?;
        let account = self.active_account(account_id).await?;

        let pin_hash = account
            .pin_hash
            .as_deref()
            .ok_or(FundingError::PinNotConfigured)?;
        if !self.pin_verifier.verify(pin, pin_hash) {
            return Err(FundingError::InvalidPin);
        }

        if account.balance < amount {
            return Err(FundingError::InsufficientBalance);
        }

        let record = self
            .ledger
            .append(NewTransferRecord {
                transaction_id: transaction_id("WDR"),
                from_account: Some(account.account_id),
                to_account: None,
                amount,
                status: TransferStatus::Pending,
                description: note,
                client_ref: None,
            })
            .await?;

        tracing::info!(
            transaction_id = %record.transaction_id,
            account = account.account_id,
            %amount,
            "withdrawal request filed"
        );
        Ok(record)
    }
}
