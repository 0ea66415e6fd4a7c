//! Comment Repository

use super::{RepoError, RepoResult};
use shared::models::{Comment, CommentCreate, CommentWithUser};
use sqlx::SqlitePool;

const COMMENT_WITH_USER_SELECT: &str = "SELECT c.id, c.product_id, c.user_id, u.name as user_name, c.parent_id, c.text, c.rating, c.like_count, c.dislike_count, c.is_active, c.created_at FROM comment c JOIN user u ON c.user_id = u.id";

pub async fn find_by_product(
    pool: &SqlitePool,
    product_id: i64,
) -> RepoResult<Vec<CommentWithUser>> {
    let sql = format!(
        "{} WHERE c.product_id = ? AND c.is_active = 1 ORDER BY c.created_at DESC",
        COMMENT_WITH_USER_SELECT
    );
    let rows = sqlx::query_as::<_, CommentWithUser>(&sql)
        .bind(product_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Comment>> {
    let row = sqlx::query_as::<_, Comment>(
        "SELECT id, product_id, user_id, parent_id, text, rating, like_count, dislike_count, is_active, created_at FROM comment WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, user_id: i64, data: CommentCreate) -> RepoResult<Comment> {
    if !(1..=5).contains(&data.rating) {
        return Err(RepoError::Validation(
            "Rating must be between 1 and 5".into(),
        ));
    }
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO comment (id, product_id, user_id, parent_id, text, rating, like_count, dislike_count, is_active, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, 0, 1, ?7)",
    )
    .bind(id)
    .bind(data.product_id)
    .bind(user_id)
    .bind(data.parent_id)
    .bind(&data.text)
    .bind(data.rating)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create comment".into()))
}

/// Outcome of a vote toggle
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSummary {
    pub like_count: i64,
    pub dislike_count: i64,
    /// The user's standing vote after the toggle: `Some(true)` like,
    /// `Some(false)` dislike, `None` withdrawn
    pub voted: Option<bool>,
}

/// Toggle a user's vote on a comment.
///
/// Repeating the same vote withdraws it; the opposite vote flips it.
/// One row per (comment, user), counters kept in step inside one
/// transaction.
pub async fn vote(
    pool: &SqlitePool,
    comment_id: i64,
    user_id: i64,
    is_like: bool,
) -> RepoResult<VoteSummary> {
    let mut tx = pool.begin().await?;

    let exists: Option<i64> =
        sqlx::query_scalar("SELECT id FROM comment WHERE id = ? AND is_active = 1")
            .bind(comment_id)
            .fetch_optional(&mut *tx)
            .await?;
    if exists.is_none() {
        return Err(RepoError::NotFound(format!("Comment {comment_id} not found")));
    }

    let existing: Option<(i64, bool)> = sqlx::query_as(
        "SELECT id, is_like FROM comment_vote WHERE comment_id = ? AND user_id = ?",
    )
    .bind(comment_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;

    let voted = match existing {
        Some((vote_id, prev)) if prev == is_like => {
            sqlx::query("DELETE FROM comment_vote WHERE id = ?")
                .bind(vote_id)
                .execute(&mut *tx)
                .await?;
            adjust_counter(&mut tx, comment_id, prev, -1).await?;
            None
        }
        Some((vote_id, prev)) => {
            sqlx::query("UPDATE comment_vote SET is_like = ? WHERE id = ?")
                .bind(is_like)
                .bind(vote_id)
                .execute(&mut *tx)
                .await?;
            adjust_counter(&mut tx, comment_id, prev, -1).await?;
            adjust_counter(&mut tx, comment_id, is_like, 1).await?;
            Some(is_like)
        }
        None => {
            sqlx::query(
                "INSERT INTO comment_vote (id, comment_id, user_id, is_like, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(shared::util::snowflake_id())
            .bind(comment_id)
            .bind(user_id)
            .bind(is_like)
            .bind(shared::util::now_millis())
            .execute(&mut *tx)
            .await?;
            adjust_counter(&mut tx, comment_id, is_like, 1).await?;
            Some(is_like)
        }
    };

    let (like_count, dislike_count): (i64, i64) =
        sqlx::query_as("SELECT like_count, dislike_count FROM comment WHERE id = ?")
            .bind(comment_id)
            .fetch_one(&mut *tx)
            .await?;
    tx.commit().await?;

    Ok(VoteSummary {
        like_count,
        dislike_count,
        voted,
    })
}

async fn adjust_counter(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    comment_id: i64,
    is_like: bool,
    delta: i64,
) -> RepoResult<()> {
    let column = if is_like { "like_count" } else { "dislike_count" };
    let sql = format!(
        "UPDATE comment SET {column} = MAX(0, {column} + ?) WHERE id = ?"
    );
    sqlx::query(&sql)
        .bind(delta)
        .bind(comment_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Average rating over active comments, None when there are none
pub async fn average_rating(pool: &SqlitePool, product_id: i64) -> RepoResult<Option<f64>> {
    let avg: Option<f64> = sqlx::query_scalar(
        "SELECT AVG(rating) FROM comment WHERE product_id = ? AND is_active = 1",
    )
    .bind(product_id)
    .fetch_one(pool)
    .await?;
    Ok(avg)
}

/// Moderation: hide a comment
pub async fn deactivate(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE comment SET is_active = 0 WHERE id = ? AND is_active = 1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
