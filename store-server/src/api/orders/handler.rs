//! Order API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::HeaderMap,
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order;
use crate::orders::{self, CheckoutResult};
use crate::utils::{AppError, AppResult};
use shared::models::{Order, OrderStatus, OrderWithLines};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[validate(length(min = 10, max = 500))]
    pub address: String,
    pub coupon_code: Option<String>,
}

/// POST /api/orders/checkout - materialize the session cart into an order.
///
/// The cart of a guest session can be checked out after login by keeping
/// the same `X-Session-Key` header; otherwise the user-id cart is used.
pub async fn checkout(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    headers: HeaderMap,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResult>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user_id = current_user.user_id()?;
    let session = headers
        .get("x-session-key")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| current_user.id.clone());

    let result = orders::checkout(
        &state.pool,
        &state.cart,
        &session,
        user_id,
        &payload.address,
        payload.coupon_code.as_deref(),
    )
    .await?;

    Ok(Json(result))
}

/// GET /api/orders - the current user's orders, newest first
pub async fn list_mine(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Order>>> {
    let user_id = current_user.user_id()?;
    let found = order::find_by_user(&state.pool, user_id).await?;
    Ok(Json(found))
}

fn check_access(order: &Order, user: &CurrentUser) -> Result<(), AppError> {
    let user_id = user.user_id()?;
    if order.user_id != user_id && !user.has_permission("orders:manage") {
        return Err(AppError::forbidden("Not your order".to_string()));
    }
    Ok(())
}

/// GET /api/orders/:id - order with lines and totals
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderWithLines>> {
    let found = order::find_with_lines(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;
    check_access(&found.order, &current_user)?;
    Ok(Json(found))
}

/// GET /api/orders/code/:code - lookup by the customer-facing code
pub async fn get_by_code(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(code): Path<String>,
) -> AppResult<Json<OrderWithLines>> {
    let found = order::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order '{}'", code)))?;
    check_access(&found, &current_user)?;
    let with_lines = order::find_with_lines(&state.pool, found.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order '{}'", code)))?;
    Ok(Json(with_lines))
}

/// POST /api/orders/:id/cancel - customer cancellation (pending only)
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let user_id = current_user.user_id()?;
    let cancelled = orders::cancel(&state.pool, id, user_id).await?;
    Ok(Json(cancelled))
}

#[derive(Deserialize)]
pub struct SetStatusRequest {
    pub status: OrderStatus,
}

/// PUT /api/orders/:id/status - staff transition along the status graph
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SetStatusRequest>,
) -> AppResult<Json<Order>> {
    let updated = orders::advance_status(&state.pool, id, payload.status).await?;
    Ok(Json(updated))
}
