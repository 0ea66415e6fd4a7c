//! Discount basket API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::discount;
use crate::utils::{AppError, AppResult};
use shared::models::{DiscountBasket, DiscountBasketCreate, DiscountBasketUpdate};

/// GET /api/discounts
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiscountBasket>>> {
    let baskets = discount::find_all(&state.pool).await?;
    Ok(Json(baskets))
}

/// GET /api/discounts/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiscountBasket>> {
    let found = discount::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Discount basket {}", id)))?;
    Ok(Json(found))
}

/// POST /api/discounts - create a basket with its initial product set
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiscountBasketCreate>,
) -> AppResult<Json<DiscountBasket>> {
    let created = discount::create(&state.pool, payload).await?;
    Ok(Json(created))
}

/// PUT /api/discounts/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiscountBasketUpdate>,
) -> AppResult<Json<DiscountBasket>> {
    let updated = discount::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/discounts/:id - soft delete
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    let result = discount::delete(&state.pool, id).await?;
    Ok(Json(result))
}

/// POST /api/discounts/:id/assign-all - put every active product in the basket
pub async fn assign_all(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<u64>> {
    // 404 over silently assigning into a missing basket
    discount::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Discount basket {}", id)))?;
    let assigned = discount::assign_all_products(&state.pool, id).await?;
    Ok(Json(assigned))
}

/// POST /api/discounts/:id/products/:product_id
pub async fn add_product(
    State(state): State<ServerState>,
    Path((id, product_id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    discount::add_product(&state.pool, id, product_id).await?;
    Ok(Json(true))
}

/// DELETE /api/discounts/:id/products/:product_id
pub async fn remove_product(
    State(state): State<ServerState>,
    Path((id, product_id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    let removed = discount::remove_product(&state.pool, id, product_id).await?;
    Ok(Json(removed))
}
