//! Wishlist API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{product, wishlist};
use crate::utils::{AjaxResponse, AppResult};

use shared::models::WishlistEntry;

/// GET /api/wishlist - the user's wishlist with product snapshots
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<AjaxResponse<Vec<WishlistEntry>>>> {
    let user_id = current_user.user_id()?;
    let entries = wishlist::find_by_user(&state.pool, user_id).await?;
    Ok(Json(AjaxResponse::success(entries)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResult {
    pub wishlisted: bool,
}

/// POST /api/wishlist/toggle/:product_id - add if absent, remove if present
pub async fn toggle(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<AjaxResponse<ToggleResult>>> {
    let user_id = current_user.user_id()?;

    let exists = product::find_by_id(&state.pool, product_id)
        .await?
        .is_some_and(|p| p.is_active);
    if !exists {
        return Ok(Json(AjaxResponse::error(format!(
            "Product {} not found",
            product_id
        ))));
    }

    let wishlisted = wishlist::toggle(&state.pool, user_id, product_id).await?;
    Ok(Json(AjaxResponse::success(ToggleResult { wishlisted })))
}

/// GET /api/wishlist/contains/:product_id
pub async fn contains(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<AjaxResponse<bool>>> {
    let user_id = current_user.user_id()?;
    let contained = wishlist::contains(&state.pool, user_id, product_id).await?;
    Ok(Json(AjaxResponse::success(contained)))
}
