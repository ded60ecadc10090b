use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use super::service::{AuthResponse, Claims, LoginRequest, RegisterRequest, RegisterResponse};
use crate::account::Pin;
use crate::gateway::types::error_codes;
use crate::gateway::{state::AppState, types::ApiResponse};

type HandlerResult<T> =
    Result<(StatusCode, Json<ApiResponse<T>>), (StatusCode, Json<ApiResponse<()>>)>;

fn reject(status: StatusCode, code: i32, msg: impl Into<String>) -> (StatusCode, Json<ApiResponse<()>>) {
    (status, Json(ApiResponse::<()>::error(code, msg)))
}

/// Register a new account
///
/// POST /api/v1/auth/register
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account registered", body = ApiResponse<RegisterResponse>),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username or email already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> HandlerResult<RegisterResponse> {
    if let Err(e) = req.validate() {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            e.to_string(),
        ));
    }

    match state.auth.register(req).await {
        Ok(resp) => Ok((StatusCode::CREATED, Json(ApiResponse::success(resp)))),
        Err(e) => {
            let err_msg = e.to_string();
            if format!("{:#}", e).contains("duplicate key") {
                tracing::warn!("Registration attempt for existing account: {}", err_msg);
                Err(reject(
                    StatusCode::CONFLICT,
                    error_codes::INVALID_PARAMETER,
                    "Username or email already exists",
                ))
            } else {
                tracing::error!("Registration failed: {:?}", e);
                Err(reject(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    "Registration failed",
                ))
            }
        }
    }
}

/// Login and receive a session token
///
/// POST /api/v1/auth/login
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> HandlerResult<AuthResponse> {
    match state.auth.login(req).await {
        Ok(resp) => Ok((StatusCode::OK, Json(ApiResponse::success(resp)))),
        Err(e) => {
            tracing::warn!("Login failed: {:?}", e);
            Err(reject(
                StatusCode::UNAUTHORIZED,
                error_codes::AUTH_FAILED,
                "Invalid email or password",
            ))
        }
    }
}

/// Set Transaction PIN Request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetPinRequest {
    #[schema(example = "4931")]
    pub pin: String,
}

/// Configure the 4-digit transaction PIN
///
/// POST /api/v1/account/pin
#[utoipa::path(
    post,
    path = "/api/v1/account/pin",
    request_body = SetPinRequest,
    responses(
        (status = 200, description = "PIN configured"),
        (status = 400, description = "PIN must be exactly 4 digits"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn set_pin(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SetPinRequest>,
) -> HandlerResult<()> {
    let pin = Pin::new(&req.pin).map_err(|e| {
        reject(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            e.to_string(),
        )
    })?;

    match state.auth.set_pin(claims.account_id(), &pin).await {
        Ok(()) => Ok((StatusCode::OK, Json(ApiResponse::success(())))),
        Err(e) => {
            tracing::error!("Failed to set PIN: {:?}", e);
            Err(reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                "Failed to set PIN",
            ))
        }
    }
}
