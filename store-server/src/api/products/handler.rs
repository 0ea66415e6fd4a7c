//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::{comment, product};
use crate::pricing::{self, PriceQuote};
use crate::utils::{AppError, AppResult};
use shared::models::{FeatureValue, ProductCreate, ProductUpdate, ProductWithBrand};

/// GET /api/products - active products, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ProductWithBrand>>> {
    let products = product::find_all(&state.pool).await?;
    Ok(Json(products))
}

/// Product detail (product + features + current quote + rating)
#[derive(Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: ProductWithBrand,
    pub features: Vec<FeatureValue>,
    pub price_quote: PriceQuote,
    pub average_rating: Option<f64>,
}

async fn detail(state: &ServerState, product: ProductWithBrand) -> AppResult<Json<ProductDetail>> {
    let features = product::find_features(&state.pool, product.id).await?;
    let price_quote = pricing::quote_product(&state.pool, product.id, product.price).await?;
    let average_rating = comment::average_rating(&state.pool, product.id).await?;

    // Detail views count as a visit
    product::increment_view_count(&state.pool, product.id).await?;

    Ok(Json(ProductDetail {
        product,
        features,
        price_quote,
        average_rating,
    }))
}

/// GET /api/products/:id - product detail
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductDetail>> {
    let found = product::find_by_id(&state.pool, id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::not_found(format!("Product {}", id)))?;
    detail(&state, found).await
}

/// GET /api/products/slug/:slug - product detail by slug
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ProductDetail>> {
    let found = product::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product '{}'", slug)))?;
    detail(&state, found).await
}

/// GET /api/products/by-category/:category_id
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<i64>,
) -> AppResult<Json<Vec<ProductWithBrand>>> {
    let products = product::find_by_category(&state.pool, category_id).await?;
    Ok(Json(products))
}

/// GET /api/products/drives - downloadable driver catalog
pub async fn list_drives(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<ProductWithBrand>>> {
    let drives = product::find_drives(&state.pool).await?;
    Ok(Json(drives))
}

/// Driver detail with siblings from the same brand
#[derive(Serialize)]
pub struct DriveDetail {
    #[serde(flatten)]
    pub product: ProductWithBrand,
    pub related: Vec<ProductWithBrand>,
}

/// GET /api/products/drives/:slug - driver detail by slug
pub async fn get_drive_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DriveDetail>> {
    let found = product::find_drive_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Drive '{}'", slug)))?;

    let related = match found.brand_id {
        Some(brand_id) => {
            product::find_related_drives(&state.pool, brand_id, found.id, 8).await?
        }
        None => Vec::new(),
    };

    product::increment_view_count(&state.pool, found.id).await?;

    Ok(Json(DriveDetail {
        product: found,
        related,
    }))
}

/// POST /api/products - create product
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<ProductWithBrand>> {
    if payload.price < 0 {
        return Err(AppError::validation("Price must not be negative"));
    }
    let created = product::create(&state.pool, payload).await?;
    Ok(Json(created))
}

/// PUT /api/products/:id - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ProductWithBrand>> {
    if payload.price.is_some_and(|p| p < 0) {
        return Err(AppError::validation("Price must not be negative"));
    }
    let updated = product::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/products/:id - soft delete
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    let result = product::delete(&state.pool, id).await?;
    Ok(Json(result))
}

#[derive(Deserialize)]
pub struct BulkActiveRequest {
    pub ids: Vec<i64>,
    pub active: bool,
}

/// POST /api/products/bulk/active - bulk activate or deactivate
pub async fn bulk_active(
    State(state): State<ServerState>,
    Json(payload): Json<BulkActiveRequest>,
) -> AppResult<Json<u64>> {
    let affected = product::set_active_bulk(&state.pool, &payload.ids, payload.active).await?;
    Ok(Json(affected))
}

#[derive(Deserialize)]
pub struct BulkDriveRequest {
    pub ids: Vec<i64>,
    pub is_drive: bool,
}

/// POST /api/products/bulk/drive - bulk toggle the downloadable flag
pub async fn bulk_drive(
    State(state): State<ServerState>,
    Json(payload): Json<BulkDriveRequest>,
) -> AppResult<Json<u64>> {
    let affected = product::set_drive_bulk(&state.pool, &payload.ids, payload.is_drive).await?;
    Ok(Json(affected))
}
