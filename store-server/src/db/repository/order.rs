//! Order Repository

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderLine, OrderStatus, OrderWithLines};
use sqlx::SqlitePool;

const ORDER_SELECT: &str =
    "SELECT id, code, user_id, status, discount, coupon_code, address, created_at, updated_at FROM orders";

const LINE_SELECT: &str =
    "SELECT id, order_id, product_id, brand_id, title, options, quantity, unit_price FROM order_line";

/// New line to insert at checkout (id assigned on insert)
#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub product_id: i64,
    pub brand_id: Option<i64>,
    pub title: String,
    pub options: Option<String>,
    pub quantity: i64,
    pub unit_price: i64,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{} WHERE id = ?", ORDER_SELECT);
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_code(pool: &SqlitePool, code: &str) -> RepoResult<Option<Order>> {
    let sql = format!("{} WHERE code = ?", ORDER_SELECT);
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Order>> {
    let sql = format!("{} WHERE user_id = ? ORDER BY created_at DESC", ORDER_SELECT);
    let rows = sqlx::query_as::<_, Order>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_lines(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderLine>> {
    let sql = format!("{} WHERE order_id = ? ORDER BY id", LINE_SELECT);
    let rows = sqlx::query_as::<_, OrderLine>(&sql)
        .bind(order_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Load an order with its lines and derived totals
pub async fn find_with_lines(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderWithLines>> {
    let Some(order) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let lines = find_lines(pool, id).await?;
    let total_price = Order::total_price(&lines);
    let final_price = Order::final_price_with_discount(&lines, order.discount);
    Ok(Some(OrderWithLines {
        order,
        lines,
        total_price,
        final_price,
    }))
}

/// Insert an order and its lines in one transaction.
///
/// Line prices are frozen copies provided by the caller; they are never
/// re-derived here.
pub async fn create_with_lines(
    pool: &SqlitePool,
    user_id: i64,
    address: &str,
    discount: i64,
    coupon_code: Option<&str>,
    lines: &[NewOrderLine],
) -> RepoResult<Order> {
    if lines.is_empty() {
        return Err(RepoError::Validation("Order has no lines".into()));
    }
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let code = shared::util::order_code();

    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO orders (id, code, user_id, status, discount, coupon_code, address, created_at, updated_at) VALUES (?1, ?2, ?3, 'pending', ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(&code)
    .bind(user_id)
    .bind(discount)
    .bind(coupon_code)
    .bind(address)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for line in lines {
        sqlx::query(
            "INSERT INTO order_line (id, order_id, product_id, brand_id, title, options, quantity, unit_price) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(shared::util::snowflake_id())
        .bind(id)
        .bind(line.product_id)
        .bind(line.brand_id)
        .bind(&line.title)
        .bind(&line.options)
        .bind(line.quantity)
        .bind(line.unit_price)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

/// Persist a status change. Transition validity is checked by the caller
/// against [`OrderStatus::can_transition`].
pub async fn set_status(pool: &SqlitePool, id: i64, status: OrderStatus) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}
