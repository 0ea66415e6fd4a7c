//! Search API Handlers
//!
//! Executed searches are logged for history and popularity ranking.
//! Suggestion lookups are not logged.

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::HeaderMap,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{product, search};
use crate::utils::{AppError, AppResult};
use shared::models::{PopularSearch, ProductWithBrand};

/// Minimum query length for suggestions
const SUGGEST_MIN_CHARS: usize = 2;
const SUGGEST_LIMIT: i64 = 8;
const POPULAR_LIMIT: i64 = 10;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// GET /api/search?q=... - title search over active products
pub async fn search(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<ProductWithBrand>>> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(AppError::validation("Search query must not be empty"));
    }

    let results = product::search_by_title(&state.pool, q).await?;

    // Attribute the search to the user or the guest session
    let user_id = user.as_ref().and_then(|u| u.user_id().ok());
    let session_key = headers
        .get("x-session-key")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    search::log_search(&state.pool, user_id, session_key, q).await?;
    search::bump_popular(&state.pool, q).await?;

    Ok(Json(results))
}

/// GET /api/search/suggest?q=... - prefix suggestions from popular queries.
/// Queries shorter than two characters yield nothing.
pub async fn suggest(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<PopularSearch>>> {
    let q = query.q.trim();
    if q.chars().count() < SUGGEST_MIN_CHARS {
        return Ok(Json(Vec::new()));
    }
    let suggestions = search::suggest(&state.pool, q, SUGGEST_LIMIT).await?;
    Ok(Json(suggestions))
}

/// GET /api/search/popular - top queries by count
pub async fn popular(State(state): State<ServerState>) -> AppResult<Json<Vec<PopularSearch>>> {
    let top = search::top_popular(&state.pool, POPULAR_LIMIT).await?;
    Ok(Json(top))
}
