//! OpenAPI / Swagger UI documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::service::{AuthResponse, LoginRequest, RegisterRequest, RegisterResponse};
use crate::funding::handlers::{DepositRequest, FundingRequestView, WithdrawRequest};
use crate::gateway::handlers::{AccountView, HealthResponse, TransactionView};
use crate::transfer::{RecipientInfo, TransferOutcome, TransferRequest};

/// Bearer token security scheme (JWT issued by /api/v1/auth/login)
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Custodia Wallet API",
        version = "0.1.0",
        description = "Custodial wallet backend: accounts, PIN-verified balance transfers, funding request intake.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::auth::handlers::register,
        crate::auth::handlers::login,
        crate::auth::handlers::set_pin,
        crate::gateway::handlers::account::get_account,
        crate::gateway::handlers::account::get_transactions,
        crate::gateway::handlers::transfer::create_transfer,
        crate::funding::handlers::request_deposit,
        crate::funding::handlers::request_withdrawal,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            AuthResponse,
            AccountView,
            TransactionView,
            TransferRequest,
            TransferOutcome,
            RecipientInfo,
            DepositRequest,
            WithdrawRequest,
            FundingRequestView,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Auth", description = "Registration and login"),
        (name = "Account", description = "Profile, PIN and history"),
        (name = "Transfer", description = "Peer-to-peer transfers"),
        (name = "Funding", description = "Deposit and withdrawal requests"),
    )
)]
pub struct ApiDoc;
