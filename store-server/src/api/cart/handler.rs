//! Cart API Handlers
//!
//! The cart lives in memory, keyed by session. Prices are frozen when a
//! line first enters the cart; display fields (title, image) are
//! refreshed against the catalog on every summary read.

use axum::{
    Extension, Json,
    extract::State,
    http::HeaderMap,
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::cart::CartLine;
use crate::core::ServerState;
use crate::db::repository::product;
use crate::orders::snapshot_line;
use crate::utils::{AjaxResponse, AppError, AppResult};

/// Resolve the cart session: explicit header first, then the user id.
/// Guests must send `X-Session-Key`.
fn session_key(user: Option<&CurrentUser>, headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(key) = headers.get("x-session-key").and_then(|v| v.to_str().ok()) {
        let key = key.trim();
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }
    if let Some(user) = user {
        return Ok(user.id.clone());
    }
    Err(AppError::validation("Missing X-Session-Key header"))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub items: Vec<CartLine>,
    pub count: usize,
    pub total: i64,
}

async fn build_summary(state: &ServerState, session: &str) -> Result<CartSummary, AppError> {
    // Refresh stale display fields against the live catalog
    for line in state.cart.items(session) {
        if let Some(p) = product::find_by_id(&state.pool, line.product_id).await? {
            if p.title != line.title || p.image != line.image {
                state
                    .cart
                    .repair_line(session, line.product_id, line.options.as_deref(), p.title, p.image);
            }
        }
    }

    let items = state.cart.items(session);
    Ok(CartSummary {
        count: items.iter().map(|l| l.quantity as usize).sum(),
        total: state.cart.total(session),
        items,
    })
}

/// GET /api/cart - cart contents and totals
pub async fn summary(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    headers: HeaderMap,
) -> AppResult<Json<AjaxResponse<CartSummary>>> {
    let session = match session_key(user.as_deref(), &headers) {
        Ok(s) => s,
        Err(e) => return Ok(Json(AjaxResponse::error(e.to_string()))),
    };
    let summary = build_summary(&state, &session).await?;
    Ok(Json(AjaxResponse::success(summary)))
}

/// GET /api/cart/count - line quantity total (for the header badge)
pub async fn count(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    headers: HeaderMap,
) -> AppResult<Json<AjaxResponse<usize>>> {
    let session = match session_key(user.as_deref(), &headers) {
        Ok(s) => s,
        Err(e) => return Ok(Json(AjaxResponse::error(e.to_string()))),
    };
    let total: usize = state
        .cart
        .items(&session)
        .iter()
        .map(|l| l.quantity as usize)
        .sum();
    Ok(Json(AjaxResponse::success(total)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRequest {
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    pub options: Option<String>,
}

fn default_quantity() -> i64 {
    1
}

/// POST /api/cart/add - add a product at its current quoted price.
/// Adding the same product+options again accumulates quantity; the
/// price snapshot from the first add is kept.
pub async fn add(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    headers: HeaderMap,
    Json(payload): Json<AddRequest>,
) -> AppResult<Json<AjaxResponse<CartSummary>>> {
    let session = match session_key(user.as_deref(), &headers) {
        Ok(s) => s,
        Err(e) => return Ok(Json(AjaxResponse::error(e.to_string()))),
    };

    let line = match snapshot_line(
        &state.pool,
        payload.product_id,
        payload.quantity,
        payload.options,
    )
    .await
    {
        Ok(line) => line,
        Err(AppError::NotFound(msg)) => return Ok(Json(AjaxResponse::error(msg))),
        Err(AppError::Validation(msg)) => return Ok(Json(AjaxResponse::error(msg))),
        Err(e) => return Err(e),
    };
    state.cart.add(&session, line);

    let summary = build_summary(&state, &session).await?;
    Ok(Json(AjaxResponse::success(summary)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub product_id: i64,
    pub quantity: i64,
    pub options: Option<String>,
}

/// POST /api/cart/update - overwrite a line's quantity (0 removes it)
pub async fn update(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    headers: HeaderMap,
    Json(payload): Json<UpdateRequest>,
) -> AppResult<Json<AjaxResponse<CartSummary>>> {
    let session = match session_key(user.as_deref(), &headers) {
        Ok(s) => s,
        Err(e) => return Ok(Json(AjaxResponse::error(e.to_string()))),
    };
    state.cart.update_quantity(
        &session,
        payload.product_id,
        payload.options.as_deref(),
        payload.quantity,
    );
    let summary = build_summary(&state, &session).await?;
    Ok(Json(AjaxResponse::success(summary)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    pub product_id: i64,
    pub options: Option<String>,
}

/// POST /api/cart/remove - drop a line (no-op if absent)
pub async fn remove(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    headers: HeaderMap,
    Json(payload): Json<RemoveRequest>,
) -> AppResult<Json<AjaxResponse<CartSummary>>> {
    let session = match session_key(user.as_deref(), &headers) {
        Ok(s) => s,
        Err(e) => return Ok(Json(AjaxResponse::error(e.to_string()))),
    };
    state
        .cart
        .remove(&session, payload.product_id, payload.options.as_deref());
    let summary = build_summary(&state, &session).await?;
    Ok(Json(AjaxResponse::success(summary)))
}

/// POST /api/cart/clear
pub async fn clear(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    headers: HeaderMap,
) -> AppResult<Json<AjaxResponse<bool>>> {
    let session = match session_key(user.as_deref(), &headers) {
        Ok(s) => s,
        Err(e) => return Ok(Json(AjaxResponse::error(e.to_string()))),
    };
    state.cart.clear(&session);
    Ok(Json(AjaxResponse::success(true)))
}
