//! Custodia - Custodial Wallet Backend
//!
//! Entry point: load config, start logging, connect PostgreSQL, wire the
//! services and serve the gateway.

use anyhow::Context;
use std::sync::Arc;

use custodia::account::{AccountRepository, AccountStore};
use custodia::auth::{Argon2PinVerifier, AuthService, PinVerifier};
use custodia::config::AppConfig;
use custodia::db::{Database, schema};
use custodia::funding::FundingService;
use custodia::gateway::{self, state::AppState};
use custodia::ledger::{LedgerRepository, LedgerStore};
use custodia::logging::init_logging;
use custodia::notify::{HttpNotifier, NoopNotifier, Notifier};
use custodia::transfer::TransferService;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--env" && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    std::env::var("CUSTODIA_ENV").unwrap_or_else(|_| "dev".to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _guard = init_logging(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        git_hash = option_env!("GIT_HASH").unwrap_or("unknown"),
        env = %env,
        "starting custodia"
    );

    let postgres_url = config
        .postgres_url
        .clone()
        .context("postgres_url must be set in config")?;
    let db = Arc::new(Database::connect(&postgres_url).await?);
    schema::init_schema(db.pool()).await?;

    let repository = Arc::new(AccountRepository::new(db.clone()));
    let accounts: Arc<dyn AccountStore> = repository.clone();
    let ledger: Arc<dyn LedgerStore> = Arc::new(LedgerRepository::new(db.clone()));
    let pin_verifier: Arc<dyn PinVerifier> = Arc::new(Argon2PinVerifier);

    let notifier: Arc<dyn Notifier> = if config.notifier.enabled {
        Arc::new(HttpNotifier::new(&config.notifier))
    } else {
        tracing::info!("notifier disabled, transfer mails will be skipped");
        Arc::new(NoopNotifier)
    };

    let auth = Arc::new(AuthService::new(
        repository,
        config.jwt_secret.clone(),
        pin_verifier.clone(),
    ));
    let transfers = Arc::new(TransferService::new(
        accounts.clone(),
        ledger.clone(),
        pin_verifier.clone(),
        notifier,
    ));
    let funding = Arc::new(FundingService::new(
        accounts.clone(),
        ledger.clone(),
        pin_verifier,
    ));

    let state = Arc::new(AppState::new(
        db, auth, accounts, ledger, transfers, funding,
    ));

    gateway::serve(&config.gateway, state).await
}
