use anyhow::{Context, Result};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::account::{AccountRepository, AccountStore, Pin, WalletId};

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (account_id as string)
    pub exp: usize,  // Expiration time (as UTC timestamp)
    pub iat: usize,  // Issued at
}

impl Claims {
    /// The authenticated account id, or 0 if the token subject is malformed
    /// (cannot happen for tokens we issued)
    pub fn account_id(&self) -> i64 {
        self.sub.parse().unwrap_or_default()
    }
}

/// Account Registration Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Login Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "password123")]
    pub password: String,
}

/// Auth Response (JWT)
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub account_id: i64,
    pub username: String,
    pub email: String,
    pub wallet_id: String,
}

/// Registration result: the fresh wallet id is what the user shares to
/// receive transfers
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub account_id: i64,
    pub wallet_id: String,
}

// ============================================================================
// PIN verification seam
// ============================================================================

/// Stateless secret-vs-hash check used by the transfer protocol
pub trait PinVerifier: Send + Sync {
    fn hash(&self, pin: &Pin) -> Result<String>;
    fn verify(&self, pin: &str, stored_hash: &str) -> bool;
}

/// argon2id-backed PIN verifier (same KDF as account passwords)
pub struct Argon2PinVerifier;

impl PinVerifier for Argon2PinVerifier {
    fn hash(&self, pin: &Pin) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(pin.as_str().as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Hashing failed: {}", e))?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, pin: &str, stored_hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(stored_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(pin.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

// ============================================================================
// Auth service
// ============================================================================

pub struct AuthService {
    accounts: Arc<AccountRepository>,
    jwt_secret: String,
    pin_verifier: Arc<dyn PinVerifier>,
}

impl AuthService {
    pub fn new(
        accounts: Arc<AccountRepository>,
        jwt_secret: String,
        pin_verifier: Arc<dyn PinVerifier>,
    ) -> Self {
        Self {
            accounts,
            jwt_secret,
            pin_verifier,
        }
    }

    /// Register a new account with balance 0 and a fresh wallet id
    pub async fn register(&self, req: RegisterRequest) -> Result<RegisterResponse> {
        // 1. Hash password
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Hashing failed: {}", e))?
            .to_string();

        // 2. Insert account row
        let wallet_id = WalletId::generate();
        let account_id = self
            .accounts
            .create(wallet_id.as_str(), &req.username, &req.email, &password_hash)
            .await
            .context("Failed to insert account")?;

        tracing::info!(account_id, wallet_id = %wallet_id, "account registered");

        Ok(RegisterResponse {
            account_id,
            wallet_id: wallet_id.into_string(),
        })
    }

    /// Login and issue a JWT
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse> {
        // 1. Find account by email
        let account = self
            .accounts
            .get_by_email(&req.email)
            .await
            .context("DB query failed")?
            .ok_or_else(|| anyhow::anyhow!("Invalid email or password"))?;

        // 2. Verify password
        let parsed_hash = PasswordHash::new(&account.password_hash)
            .map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;

        Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed_hash)
            .map_err(|_| anyhow::anyhow!("Invalid email or password"))?;

        // 3. Generate JWT
        let token = self.issue_token(account.account_id)?;

        Ok(AuthResponse {
            token,
            account_id: account.account_id,
            username: account.username,
            email: account.email,
            wallet_id: account.wallet_id,
        })
    }

    /// Hash and store the transaction PIN
    pub async fn set_pin(&self, account_id: i64, pin: &Pin) -> Result<()> {
        let pin_hash = self.pin_verifier.hash(pin)?;
        self.accounts
            .set_pin_hash(account_id, &pin_hash)
            .await
            .context("Failed to store PIN hash")?;
        tracing::info!(account_id, "transaction PIN configured");
        Ok(())
    }

    pub fn issue_token(&self, account_id: i64) -> Result<String> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::hours(24))
            .context("valid timestamp")?
            .timestamp();

        let claims = Claims {
            sub: account_id.to_string(),
            exp: expiration as usize,
            iat: Utc::now().timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .context("Failed to generate token")
    }

    /// Verify JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}
