//! HTTP gateway
//!
//! Route groups: public auth endpoints, JWT-protected account and wallet
//! endpoints, health, and the Swagger UI.

pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::jwt_auth_middleware;
use crate::config::GatewayConfig;
use state::AppState;

/// Assemble the full application router
pub fn build_router(state: Arc<AppState>) -> Router {
    // Everything behind the JWT middleware
    let protected = Router::new()
        .route("/account", get(handlers::get_account))
        .route("/account/pin", post(crate::auth::handlers::set_pin))
        .route("/account/transactions", get(handlers::get_transactions))
        .route("/transfer", post(handlers::create_transfer))
        .route(
            "/funding/deposit",
            post(crate::funding::handlers::request_deposit),
        )
        .route(
            "/funding/withdraw",
            post(crate::funding::handlers::request_withdrawal),
        )
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    let api = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/auth/register", post(crate::auth::handlers::register))
        .route("/auth/login", post(crate::auth::handlers::login))
        .merge(protected);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .nest("/api/v1", api)
        .with_state(state)
}

/// Bind and serve until shutdown
pub async fn serve(config: &GatewayConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("gateway listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
