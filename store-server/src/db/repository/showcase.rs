//! Showcase Repository (sliders and banners)

use super::{RepoError, RepoResult};
use shared::models::{Banner, BannerCreate, Slider, SliderCreate, SliderUpdate};
use sqlx::SqlitePool;

const SLIDER_SELECT: &str =
    "SELECT id, text, image, alt, link, start_at, end_at, is_active, created_at, updated_at FROM slider";

const BANNER_SELECT: &str =
    "SELECT id, name, text, image, alt, start_at, end_at, is_active, created_at, updated_at FROM banner";

/// Sliders that are active and inside their display window
pub async fn active_sliders(pool: &SqlitePool, now: i64) -> RepoResult<Vec<Slider>> {
    let sql = format!(
        "{} WHERE is_active = 1 AND start_at <= ?1 AND end_at >= ?1 ORDER BY created_at",
        SLIDER_SELECT
    );
    let rows = sqlx::query_as::<_, Slider>(&sql)
        .bind(now)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn active_banners(pool: &SqlitePool, now: i64) -> RepoResult<Vec<Banner>> {
    let sql = format!(
        "{} WHERE is_active = 1 AND start_at <= ?1 AND end_at >= ?1 ORDER BY created_at",
        BANNER_SELECT
    );
    let rows = sqlx::query_as::<_, Banner>(&sql)
        .bind(now)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_slider(pool: &SqlitePool, id: i64) -> RepoResult<Option<Slider>> {
    let sql = format!("{} WHERE id = ?", SLIDER_SELECT);
    let row = sqlx::query_as::<_, Slider>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create_slider(pool: &SqlitePool, data: SliderCreate) -> RepoResult<Slider> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO slider (id, text, image, alt, link, start_at, end_at, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1, ?8, ?8)",
    )
    .bind(id)
    .bind(&data.text)
    .bind(&data.image)
    .bind(&data.alt)
    .bind(&data.link)
    .bind(data.start_at)
    .bind(data.end_at)
    .bind(now)
    .execute(pool)
    .await?;
    find_slider(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create slider".into()))
}

pub async fn update_slider(pool: &SqlitePool, id: i64, data: SliderUpdate) -> RepoResult<Slider> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE slider SET text = COALESCE(?1, text), image = COALESCE(?2, image), alt = COALESCE(?3, alt), link = COALESCE(?4, link), start_at = COALESCE(?5, start_at), end_at = COALESCE(?6, end_at), is_active = COALESCE(?7, is_active), updated_at = ?8 WHERE id = ?9",
    )
    .bind(&data.text)
    .bind(&data.image)
    .bind(&data.alt)
    .bind(&data.link)
    .bind(data.start_at)
    .bind(data.end_at)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Slider {id} not found")));
    }
    find_slider(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Slider {id} not found")))
}

pub async fn create_banner(pool: &SqlitePool, data: BannerCreate) -> RepoResult<Banner> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO banner (id, name, text, image, alt, start_at, end_at, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1, ?8, ?8)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.text)
    .bind(&data.image)
    .bind(&data.alt)
    .bind(data.start_at)
    .bind(data.end_at)
    .bind(now)
    .execute(pool)
    .await?;
    let sql = format!("{} WHERE id = ?", BANNER_SELECT);
    sqlx::query_as::<_, Banner>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create banner".into()))
}

/// Bulk activate/deactivate sliders and banners (admin action).
/// Rows whose window has already closed are deactivated.
pub async fn set_active_bulk(
    pool: &SqlitePool,
    slider_ids: &[i64],
    banner_ids: &[i64],
    active: bool,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;
    let mut affected = 0u64;
    for id in slider_ids {
        let rows = sqlx::query("UPDATE slider SET is_active = ?, updated_at = ? WHERE id = ?")
            .bind(active)
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        affected += rows.rows_affected();
    }
    for id in banner_ids {
        let rows = sqlx::query("UPDATE banner SET is_active = ?, updated_at = ? WHERE id = ?")
            .bind(active)
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        affected += rows.rows_affected();
    }
    tx.commit().await?;
    Ok(affected)
}

/// Deactivate any slider/banner whose end timestamp has passed
pub async fn deactivate_expired(pool: &SqlitePool, now: i64) -> RepoResult<u64> {
    let mut total = 0u64;
    let rows = sqlx::query("UPDATE slider SET is_active = 0, updated_at = ?1 WHERE is_active = 1 AND end_at < ?1")
        .bind(now)
        .execute(pool)
        .await?;
    total += rows.rows_affected();
    let rows = sqlx::query("UPDATE banner SET is_active = 0, updated_at = ?1 WHERE is_active = 1 AND end_at < ?1")
        .bind(now)
        .execute(pool)
        .await?;
    total += rows.rows_affected();
    Ok(total)
}
