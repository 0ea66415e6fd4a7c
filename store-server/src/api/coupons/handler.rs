//! Coupon API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::coupon;
use crate::utils::{AppError, AppResult};
use shared::models::{Coupon, CouponCreate, CouponUpdate};

#[derive(Deserialize)]
pub struct ValidateRequest {
    pub code: String,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    /// Percentage the code grants, when valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<i64>,
}

/// POST /api/coupons/validate - pre-checkout code check
pub async fn validate(
    State(state): State<ServerState>,
    Json(payload): Json<ValidateRequest>,
) -> AppResult<Json<ValidateResponse>> {
    let now = shared::util::now_millis();
    let found = coupon::find_by_code(&state.pool, payload.code.trim()).await?;
    let response = match found {
        Some(c) if c.is_valid_at(now) => ValidateResponse {
            valid: true,
            discount: Some(c.discount),
        },
        _ => ValidateResponse {
            valid: false,
            discount: None,
        },
    };
    Ok(Json(response))
}

/// GET /api/coupons
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Coupon>>> {
    let coupons = coupon::find_all(&state.pool).await?;
    Ok(Json(coupons))
}

/// POST /api/coupons
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CouponCreate>,
) -> AppResult<Json<Coupon>> {
    if !(0..=100).contains(&payload.discount) {
        return Err(AppError::validation("Discount must be between 0 and 100"));
    }
    let created = coupon::create(&state.pool, payload).await?;
    Ok(Json(created))
}

/// PUT /api/coupons/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CouponUpdate>,
) -> AppResult<Json<Coupon>> {
    if payload.discount.is_some_and(|d| !(0..=100).contains(&d)) {
        return Err(AppError::validation("Discount must be between 0 and 100"));
    }
    let updated = coupon::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/coupons/:id - soft delete
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    let result = coupon::delete(&state.pool, id).await?;
    Ok(Json(result))
}
