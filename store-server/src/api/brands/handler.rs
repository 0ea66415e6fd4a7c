//! Brand API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::brand;
use crate::utils::{AppError, AppResult};
use shared::models::{Brand, BrandCreate};

/// GET /api/brands
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Brand>>> {
    let brands = brand::find_all(&state.pool).await?;
    Ok(Json(brands))
}

/// GET /api/brands/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Brand>> {
    let found = brand::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Brand {}", id)))?;
    Ok(Json(found))
}

/// POST /api/brands
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BrandCreate>,
) -> AppResult<Json<Brand>> {
    let created = brand::create(&state.pool, payload).await?;
    Ok(Json(created))
}

/// DELETE /api/brands/:id - soft delete
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    let result = brand::delete(&state.pool, id).await?;
    Ok(Json(result))
}
