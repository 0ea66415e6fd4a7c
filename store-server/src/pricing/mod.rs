//! Pricing Module
//!
//! Effective-price computation from time-windowed discount baskets.

pub mod calculator;

pub use calculator::{PriceQuote, applicable_discount, effective_price, quote};

use sqlx::SqlitePool;

use crate::db::repository::discount;
use crate::utils::AppError;

/// Quote a product's current price, fetching its applicable baskets
pub async fn quote_product(
    pool: &SqlitePool,
    product_id: i64,
    price: i64,
) -> Result<PriceQuote, AppError> {
    let now = shared::util::now_millis();
    let baskets = discount::find_applicable_for_product(pool, product_id, now).await?;
    Ok(quote(price, &baskets, now))
}
