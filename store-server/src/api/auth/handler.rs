//! Authentication Handlers
//!
//! Customers log in with a phone number and a one-time code; staff
//! accounts use phone + password. Both paths end in the same JWT.

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::{CurrentUser, otp, password};
use crate::core::ServerState;
use crate::db::repository::{otp as otp_repo, user};
use crate::security_log;
use crate::utils::{AppError, AppResult};
use shared::models::User;

/// Fixed delay for login to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

fn permissions_for_role(role: &str) -> Vec<String> {
    match role {
        "admin" => vec!["all".to_string()],
        "staff" => [
            "products:manage",
            "catalog:manage",
            "orders:manage",
            "coupons:manage",
            "discounts:manage",
            "blog:manage",
            "comments:manage",
            "showcase:manage",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        _ => Vec::new(),
    }
}

fn issue_token(state: &ServerState, user: &User) -> Result<String, AppError> {
    let permissions = permissions_for_role(&user.role);
    let username = user.name.as_deref().unwrap_or(&user.phone);
    state
        .jwt_service
        .generate_token(user.id, username, &user.role, &permissions)
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))
}

#[derive(Deserialize, Validate)]
pub struct OtpRequest {
    #[validate(length(min = 5, max = 20))]
    pub phone: String,
}

#[derive(Serialize)]
pub struct OtpRequestResponse {
    pub sent: bool,
    /// Populated only when OTP_DEBUG_RESPONSE is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_code: Option<String>,
}

/// POST /api/auth/otp/request - issue a one-time login code
pub async fn otp_request(
    State(state): State<ServerState>,
    Json(payload): Json<OtpRequest>,
) -> AppResult<Json<OtpRequestResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    // Opportunistic cleanup of stale codes
    let _ = otp_repo::purge_expired(&state.pool, shared::util::now_millis()).await;

    let code = otp::issue(&state.pool, &payload.phone).await?;

    if state.config.otp_debug_response {
        tracing::debug!(phone = %payload.phone, code = %code, "OTP issued (debug)");
        return Ok(Json(OtpRequestResponse {
            sent: true,
            debug_code: Some(code),
        }));
    }

    // SMS delivery happens out of process; the code is only logged in
    // development builds
    if state.config.is_development() {
        tracing::info!(phone = %payload.phone, code = %code, "OTP issued");
    } else {
        tracing::info!(phone = %payload.phone, "OTP issued");
    }

    Ok(Json(OtpRequestResponse {
        sent: true,
        debug_code: None,
    }))
}

#[derive(Deserialize, Validate)]
pub struct OtpVerifyRequest {
    #[validate(length(min = 5, max = 20))]
    pub phone: String,
    #[validate(length(equal = 5))]
    pub code: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/auth/otp/verify - exchange a valid code for a token.
/// First-time phones get a customer account created on the spot.
pub async fn otp_verify(
    State(state): State<ServerState>,
    Json(payload): Json<OtpVerifyRequest>,
) -> AppResult<Json<LoginResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    otp::verify(&state.pool, &payload.phone, &payload.code).await?;

    let user = user::find_or_create_by_phone(&state.pool, &payload.phone).await?;
    if !user.is_active {
        security_log!("WARN", "login_disabled_account", phone = payload.phone.clone());
        return Err(AppError::forbidden("Account has been disabled".to_string()));
    }

    let token = issue_token(&state, &user)?;
    tracing::info!(user_id = user.id, "OTP login");
    Ok(Json(LoginResponse { token, user }))
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 5, max = 20))]
    pub phone: String,
    #[validate(length(min = 8))]
    pub password: String,
}

/// POST /api/auth/login - password login for staff and admin accounts
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let found = user::find_by_phone(&state.pool, &payload.phone).await?;

    // Fixed delay before inspecting the result, so missing accounts and
    // wrong passwords take the same time
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match found {
        Some(u) if u.is_active => u,
        Some(_) => {
            security_log!("WARN", "login_disabled_account", phone = payload.phone.clone());
            return Err(AppError::forbidden("Account has been disabled".to_string()));
        }
        None => {
            security_log!("WARN", "login_failed", phone = payload.phone.clone());
            return Err(AppError::invalid_credentials());
        }
    };

    let hash = match user.password_hash.as_deref() {
        // Customers have no password; they must use the OTP flow
        Some(h) => h,
        None => {
            security_log!("WARN", "login_no_password", phone = payload.phone.clone());
            return Err(AppError::invalid_credentials());
        }
    };

    if !password::verify_password(&payload.password, hash)? {
        security_log!("WARN", "login_failed", phone = payload.phone.clone());
        return Err(AppError::invalid_credentials());
    }

    let token = issue_token(&state, &user)?;
    tracing::info!(user_id = user.id, role = %user.role, "Password login");
    Ok(Json(LoginResponse { token, user }))
}

/// GET /api/auth/me - current user profile
pub async fn me(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<User>> {
    let id = current_user.user_id()?;
    let user = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {}", id)))?;
    Ok(Json(user))
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// PUT /api/auth/me - update own name and email
pub async fn update_me(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<User>> {
    let id = current_user.user_id()?;
    let updated = user::update(
        &state.pool,
        id,
        shared::models::UserUpdate {
            name: payload.name,
            email: payload.email,
            // Account state is staff business, never self-service
            is_active: None,
        },
    )
    .await?;
    Ok(Json(updated))
}
