//! Comment API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{comment, product};
use crate::utils::{AjaxResponse, AppError, AppResult};
use shared::models::{Comment, CommentCreate, CommentWithUser};

/// GET /api/comments/product/:product_id - visible comments, newest first
pub async fn list_by_product(
    State(state): State<ServerState>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<AjaxResponse<Vec<CommentWithUser>>>> {
    let comments = comment::find_by_product(&state.pool, product_id).await?;
    Ok(Json(AjaxResponse::success(comments)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub average_rating: Option<f64>,
}

/// GET /api/comments/product/:product_id/rating
pub async fn rating(
    State(state): State<ServerState>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<AjaxResponse<RatingResponse>>> {
    let average_rating = comment::average_rating(&state.pool, product_id).await?;
    Ok(Json(AjaxResponse::success(RatingResponse { average_rating })))
}

/// POST /api/comments - submit a comment or a reply
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<CommentCreate>,
) -> AppResult<Json<AjaxResponse<Comment>>> {
    let user_id = current_user.user_id()?;

    let exists = product::find_by_id(&state.pool, payload.product_id)
        .await?
        .is_some_and(|p| p.is_active);
    if !exists {
        return Ok(Json(AjaxResponse::error(format!(
            "Product {} not found",
            payload.product_id
        ))));
    }

    match comment::create(&state.pool, user_id, payload).await {
        Ok(created) => Ok(Json(AjaxResponse::success(created))),
        Err(e) => {
            let app_err = AppError::from(e);
            match app_err {
                AppError::Validation(msg) => Ok(Json(AjaxResponse::error(msg))),
                other => Err(other),
            }
        }
    }
}

async fn toggle_vote(
    state: &ServerState,
    current_user: &CurrentUser,
    comment_id: i64,
    is_like: bool,
) -> AppResult<Json<AjaxResponse<comment::VoteSummary>>> {
    let user_id = current_user.user_id()?;
    match comment::vote(&state.pool, comment_id, user_id, is_like).await {
        Ok(summary) => Ok(Json(AjaxResponse::success(summary))),
        Err(e) => match AppError::from(e) {
            AppError::NotFound(msg) => Ok(Json(AjaxResponse::error(msg))),
            other => Err(other),
        },
    }
}

/// POST /api/comments/:id/like - toggle the user's like.
/// A second like withdraws it; a standing dislike flips to a like.
pub async fn like(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<AjaxResponse<comment::VoteSummary>>> {
    toggle_vote(&state, &current_user, id, true).await
}

/// POST /api/comments/:id/unlike - toggle the user's dislike
pub async fn unlike(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<AjaxResponse<comment::VoteSummary>>> {
    toggle_vote(&state, &current_user, id, false).await
}

/// DELETE /api/comments/:id - hide a comment (moderation)
pub async fn moderate(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = comment::deactivate(&state.pool, id).await?;
    Ok(Json(result))
}
