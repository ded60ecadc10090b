//! User authentication and credential handling
//!
//! Registration and login (argon2id password hashes, HS256 session tokens)
//! plus the transaction-PIN seam used by the transfer protocol.

pub mod handlers;
pub mod middleware;
pub mod service;

pub use middleware::jwt_auth_middleware;
pub use service::{Argon2PinVerifier, AuthService, Claims, PinVerifier};
