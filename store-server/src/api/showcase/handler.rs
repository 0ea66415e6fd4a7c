//! Showcase API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::showcase;
use crate::utils::AppResult;
use shared::models::{Banner, BannerCreate, Slider, SliderCreate, SliderUpdate};

#[derive(Serialize)]
pub struct ShowcaseResponse {
    pub sliders: Vec<Slider>,
    pub banners: Vec<Banner>,
}

/// GET /api/showcase - sliders and banners currently in window
pub async fn active(State(state): State<ServerState>) -> AppResult<Json<ShowcaseResponse>> {
    let now = shared::util::now_millis();
    let sliders = showcase::active_sliders(&state.pool, now).await?;
    let banners = showcase::active_banners(&state.pool, now).await?;
    Ok(Json(ShowcaseResponse { sliders, banners }))
}

/// POST /api/showcase/sliders
pub async fn create_slider(
    State(state): State<ServerState>,
    Json(payload): Json<SliderCreate>,
) -> AppResult<Json<Slider>> {
    let created = showcase::create_slider(&state.pool, payload).await?;
    Ok(Json(created))
}

/// PUT /api/showcase/sliders/:id
pub async fn update_slider(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SliderUpdate>,
) -> AppResult<Json<Slider>> {
    let updated = showcase::update_slider(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// POST /api/showcase/banners
pub async fn create_banner(
    State(state): State<ServerState>,
    Json(payload): Json<BannerCreate>,
) -> AppResult<Json<Banner>> {
    let created = showcase::create_banner(&state.pool, payload).await?;
    Ok(Json(created))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActiveRequest {
    #[serde(default)]
    pub slider_ids: Vec<i64>,
    #[serde(default)]
    pub banner_ids: Vec<i64>,
    pub active: bool,
}

/// POST /api/showcase/bulk/active - bulk activate or deactivate
pub async fn bulk_active(
    State(state): State<ServerState>,
    Json(payload): Json<BulkActiveRequest>,
) -> AppResult<Json<u64>> {
    let affected = showcase::set_active_bulk(
        &state.pool,
        &payload.slider_ids,
        &payload.banner_ids,
        payload.active,
    )
    .await?;
    Ok(Json(affected))
}

/// POST /api/showcase/purge-expired - deactivate out-of-window entries
pub async fn purge_expired(State(state): State<ServerState>) -> AppResult<Json<u64>> {
    let now = shared::util::now_millis();
    let affected = showcase::deactivate_expired(&state.pool, now).await?;
    Ok(Json(affected))
}
