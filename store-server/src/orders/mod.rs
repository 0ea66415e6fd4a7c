//! Orders Module
//!
//! Checkout materialization and status transitions. The status graph
//! itself lives on [`shared::models::OrderStatus`].

pub mod materializer;

pub use materializer::{CheckoutResult, checkout, snapshot_line};

use sqlx::SqlitePool;

use crate::db::repository::order;
use crate::utils::AppError;
use shared::models::{Order, OrderStatus};

/// User-initiated cancellation, permitted only from `Pending`
pub async fn cancel(pool: &SqlitePool, order_id: i64, user_id: i64) -> Result<Order, AppError> {
    let existing = order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))?;

    if existing.user_id != user_id {
        return Err(AppError::forbidden("Not your order".to_string()));
    }
    if !existing.status.can_transition(OrderStatus::Cancelled) {
        return Err(AppError::BusinessRule(format!(
            "Order in state '{}' cannot be cancelled",
            existing.status.as_str()
        )));
    }

    let updated = order::set_status(pool, order_id, OrderStatus::Cancelled).await?;
    tracing::info!(order_id, user_id, "Order cancelled");
    Ok(updated)
}

/// Staff-initiated transition along the validated table
pub async fn advance_status(
    pool: &SqlitePool,
    order_id: i64,
    to: OrderStatus,
) -> Result<Order, AppError> {
    let existing = order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))?;

    if !existing.status.can_transition(to) {
        return Err(AppError::BusinessRule(format!(
            "Illegal transition {} -> {}",
            existing.status.as_str(),
            to.as_str()
        )));
    }

    let updated = order::set_status(pool, order_id, to).await?;
    tracing::info!(
        order_id,
        from = existing.status.as_str(),
        to = to.as_str(),
        "Order status advanced"
    );
    Ok(updated)
}
