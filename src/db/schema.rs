//! DDL for the wallet tables
//!
//! Two tables back the whole service: `accounts_tb` (balance-holding
//! entities) and `transfers_tb` (append-only movement records). Balances are
//! NUMERIC(18,2); the CHECK constraint is the last line of defense for the
//! non-negative invariant, the transfer protocol enforces it first.

/// Accounts: one row per wallet
pub const CREATE_ACCOUNTS_TB: &str = r#"
CREATE TABLE IF NOT EXISTS accounts_tb (
    account_id    BIGSERIAL PRIMARY KEY,
    wallet_id     VARCHAR(16) NOT NULL UNIQUE,
    username      VARCHAR(64) NOT NULL UNIQUE,
    email         VARCHAR(255) NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    pin_hash      TEXT,
    balance       NUMERIC(18, 2) NOT NULL DEFAULT 0 CHECK (balance >= 0),
    status        SMALLINT NOT NULL DEFAULT 1,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Transfer records: immutable once written. from_account is NULL for
/// deposits, to_account is NULL for withdrawals.
pub const CREATE_TRANSFERS_TB: &str = r#"
CREATE TABLE IF NOT EXISTS transfers_tb (
    transaction_id VARCHAR(40) PRIMARY KEY,
    from_account   BIGINT REFERENCES accounts_tb(account_id),
    to_account     BIGINT REFERENCES accounts_tb(account_id),
    amount         NUMERIC(18, 2) NOT NULL CHECK (amount > 0),
    status         SMALLINT NOT NULL,
    description    TEXT,
    client_ref     VARCHAR(64),
    created_at     TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub const CREATE_TRANSFERS_FROM_IDX: &str = r#"
CREATE INDEX IF NOT EXISTS transfers_from_idx ON transfers_tb (from_account, created_at DESC)
"#;

pub const CREATE_TRANSFERS_TO_IDX: &str = r#"
CREATE INDEX IF NOT EXISTS transfers_to_idx ON transfers_tb (to_account, created_at DESC)
"#;

/// Idempotent replay detection: one client_ref per sending account
pub const CREATE_TRANSFERS_CLIENT_REF_IDX: &str = r#"
CREATE UNIQUE INDEX IF NOT EXISTS transfers_client_ref_idx
    ON transfers_tb (from_account, client_ref)
    WHERE client_ref IS NOT NULL
"#;

/// Create all tables and indexes. Safe to run on every startup.
pub async fn init_schema(pool: &sqlx::PgPool) -> Result<(), sqlx::Error> {
    for ddl in [
        CREATE_ACCOUNTS_TB,
        CREATE_TRANSFERS_TB,
        CREATE_TRANSFERS_FROM_IDX,
        CREATE_TRANSFERS_TO_IDX,
        CREATE_TRANSFERS_CLIENT_REF_IDX,
    ] {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!("wallet schema ready");
    Ok(())
}
