//! Order Materializer
//!
//! Converts a session cart into a persisted order plus line items.
//! Snapshot prices are copied as-is; lines whose product has vanished
//! are skipped and reported, and the order is still created from the
//! remaining lines (best-effort, matching the storefront's historical
//! behavior).

use serde::Serialize;
use sqlx::SqlitePool;

use crate::cart::{CartLine, CartStore};
use crate::db::repository::{coupon, order, product};
use crate::utils::AppError;
use shared::models::Order;

/// Outcome of a checkout
#[derive(Debug, Serialize)]
pub struct CheckoutResult {
    pub order: Order,
    /// Products dropped because they no longer exist or were deactivated
    pub skipped_product_ids: Vec<i64>,
    pub total_price: i64,
    pub final_price: i64,
}

/// Materialize the session's cart into an order.
///
/// The applied discount is the coupon's percentage when a valid code is
/// supplied, otherwise zero. The cart is cleared on success.
pub async fn checkout(
    pool: &SqlitePool,
    cart: &CartStore,
    session: &str,
    user_id: i64,
    address: &str,
    coupon_code: Option<&str>,
) -> Result<CheckoutResult, AppError> {
    let items = cart.items(session);
    if items.is_empty() {
        return Err(AppError::BusinessRule("Cart is empty".into()));
    }

    let discount = match coupon_code {
        Some(code) => {
            let now = shared::util::now_millis();
            let found = coupon::find_by_code(pool, code).await?;
            match found {
                Some(c) if c.is_valid_at(now) => c.discount,
                _ => return Err(AppError::invalid("Invalid or expired coupon code")),
            }
        }
        None => 0,
    };

    let mut lines = Vec::with_capacity(items.len());
    let mut skipped = Vec::new();
    for item in &items {
        match product::find_by_id(pool, item.product_id).await? {
            Some(p) if p.is_active => lines.push(order::NewOrderLine {
                product_id: p.id,
                brand_id: p.brand_id,
                title: item.title.clone(),
                options: item.options.clone(),
                quantity: item.quantity,
                // Frozen snapshot from the cart, never re-derived
                unit_price: item.unit_price,
            }),
            _ => {
                tracing::warn!(
                    product_id = item.product_id,
                    "Skipping vanished product at checkout"
                );
                skipped.push(item.product_id);
            }
        }
    }

    if lines.is_empty() {
        return Err(AppError::BusinessRule(
            "No purchasable products left in cart".into(),
        ));
    }

    let created =
        order::create_with_lines(pool, user_id, address, discount, coupon_code, &lines).await?;
    cart.clear(session);

    let total_price: i64 = lines.iter().map(|l| l.unit_price * l.quantity).sum();
    let final_price = total_price - total_price * created.discount / 100;

    tracing::info!(
        order_id = created.id,
        code = %created.code,
        user_id,
        line_count = lines.len(),
        skipped = skipped.len(),
        "Order created"
    );

    Ok(CheckoutResult {
        order: created,
        skipped_product_ids: skipped,
        total_price,
        final_price,
    })
}

/// Estimate the snapshot line for a product at its current quoted price
pub async fn snapshot_line(
    pool: &SqlitePool,
    product_id: i64,
    quantity: i64,
    options: Option<String>,
) -> Result<CartLine, AppError> {
    if quantity <= 0 {
        return Err(AppError::validation("Quantity must be positive"));
    }
    let product = product::find_by_id(pool, product_id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::not_found(format!("Product {product_id}")))?;

    let quoted = crate::pricing::quote_product(pool, product.id, product.price).await?;

    Ok(CartLine {
        product_id: product.id,
        options,
        quantity,
        unit_price: quoted.effective_price,
        title: product.title,
        image: product.image,
    })
}
