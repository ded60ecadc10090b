//! Custodia - Custodial Wallet Backend
//!
//! A wallet service over PostgreSQL: accounts with decimal balances,
//! PIN-verified peer-to-peer transfers, an append-only transfer ledger,
//! and deposit/withdrawal request intake, exposed through an axum gateway.
//!
//! # Modules
//!
//! - [`config`] - YAML configuration per environment
//! - [`logging`] - tracing setup (file + stdout, optional JSON)
//! - [`db`] - PostgreSQL pool and schema
//! - [`account`] - Account model, validation newtypes, storage seam
//! - [`ledger`] - Immutable transfer records
//! - [`auth`] - Registration/login, JWT sessions, transaction PIN
//! - [`transfer`] - The balance-mutation protocol
//! - [`funding`] - Deposit/withdrawal request intake
//! - [`notify`] - Best-effort transfer notifications
//! - [`gateway`] - HTTP API

pub mod config;
pub mod logging;

pub mod db;

pub mod account;
pub mod ledger;

pub mod auth;
pub mod funding;
pub mod notify;
pub mod transfer;

pub mod gateway;
