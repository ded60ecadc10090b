use std::sync::Arc;

use crate::account::AccountStore;
use crate::auth::AuthService;
use crate::db::Database;
use crate::funding::FundingService;
use crate::ledger::LedgerStore;
use crate::transfer::TransferService;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth: Arc<AuthService>,
    pub accounts: Arc<dyn AccountStore>,
    pub ledger: Arc<dyn LedgerStore>,
    pub transfers: Arc<TransferService>,
    pub funding: Arc<FundingService>,
}

impl AppState {
    pub fn new(
        db: Arc<Database>,
        auth: Arc<AuthService>,
        accounts: Arc<dyn AccountStore>,
        ledger: Arc<dyn LedgerStore>,
        transfers: Arc<TransferService>,
        funding: Arc<FundingService>,
    ) -> Self {
        Self {
            db,
            auth,
            accounts,
            ledger,
            transfers,
            funding,
        }
    }
}
