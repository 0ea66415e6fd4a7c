//! Blog API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::blog;
use crate::utils::{AppError, AppResult};
use shared::models::{Article, ArticleCreate, ArticleUpdate};

/// GET /api/blog - published articles, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Article>>> {
    let articles = blog::find_all(&state.pool).await?;
    Ok(Json(articles))
}

/// GET /api/blog/:slug - article detail, counts as a view
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Article>> {
    let article = blog::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Article '{}'", slug)))?;
    blog::increment_view_count(&state.pool, article.id).await?;
    Ok(Json(article))
}

/// POST /api/blog
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ArticleCreate>,
) -> AppResult<Json<Article>> {
    let created = blog::create(&state.pool, payload).await?;
    Ok(Json(created))
}

/// PUT /api/blog/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ArticleUpdate>,
) -> AppResult<Json<Article>> {
    let updated = blog::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/blog/:id - soft delete
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    let result = blog::delete(&state.pool, id).await?;
    Ok(Json(result))
}
