//! Order Model
//!
//! Order status is a closed enum with a validated transition table.
//! Line prices are frozen copies taken at checkout, never re-derived.

use serde::{Deserialize, Serialize};

/// Order lifecycle states
///
/// Allowed transitions:
///
/// ```text
/// Pending -> Processing -> Shipped -> Delivered
/// Pending -> Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether moving from `self` to `to` is a legal transition
    pub fn can_transition(self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, to),
            (Pending, Processing) | (Processing, Shipped) | (Shipped, Delivered) | (Pending, Cancelled)
        )
    }

    /// Terminal states accept no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Generated unique token shown to the customer
    pub code: String,
    pub user_id: i64,
    pub status: OrderStatus,
    /// Order-level discount percent (manual adjustment or coupon)
    pub discount: i64,
    pub coupon_code: Option<String>,
    pub address: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line entity; `unit_price` is the frozen cart snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub brand_id: Option<i64>,
    pub title: String,
    pub options: Option<String>,
    pub quantity: i64,
    pub unit_price: i64,
}

/// Order with its lines and derived totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithLines {
    #[serde(flatten)]
    pub order: Order,
    pub lines: Vec<OrderLine>,
    pub total_price: i64,
    pub final_price: i64,
}

impl Order {
    /// Sum of frozen line prices times quantities
    pub fn total_price(lines: &[OrderLine]) -> i64 {
        lines.iter().map(|l| l.unit_price * l.quantity).sum()
    }

    /// Total after applying `discount` percent with integer truncation
    pub fn final_price_with_discount(lines: &[OrderLine], discount: i64) -> i64 {
        let total = Self::total_price(lines);
        total - total * discount / 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(unit_price: i64, quantity: i64) -> OrderLine {
        OrderLine {
            id: 0,
            order_id: 1,
            product_id: 1,
            brand_id: None,
            title: "item".to_string(),
            options: None,
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(OrderStatus::Pending.can_transition(OrderStatus::Processing));
        assert!(OrderStatus::Processing.can_transition(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition(OrderStatus::Delivered));
    }

    #[test]
    fn test_cancel_only_from_pending() {
        assert!(OrderStatus::Pending.can_transition(OrderStatus::Cancelled));
        assert!(!OrderStatus::Processing.can_transition(OrderStatus::Cancelled));
        assert!(!OrderStatus::Shipped.can_transition(OrderStatus::Cancelled));
        assert!(!OrderStatus::Delivered.can_transition(OrderStatus::Cancelled));
    }

    #[test]
    fn test_no_backwards_or_skipping_transitions() {
        assert!(!OrderStatus::Pending.can_transition(OrderStatus::Shipped));
        assert!(!OrderStatus::Pending.can_transition(OrderStatus::Delivered));
        assert!(!OrderStatus::Shipped.can_transition(OrderStatus::Processing));
        assert!(!OrderStatus::Cancelled.can_transition(OrderStatus::Pending));
        assert!(!OrderStatus::Delivered.can_transition(OrderStatus::Shipped));
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
    }

    #[test]
    fn test_total_price_sums_frozen_lines() {
        let lines = vec![line(900, 3), line(100, 2)];
        assert_eq!(Order::total_price(&lines), 2900);
    }

    #[test]
    fn test_final_price_integer_truncation() {
        // 2900 with 7% -> 2900 - 203 = 2697
        let lines = vec![line(900, 3), line(100, 2)];
        assert_eq!(Order::final_price_with_discount(&lines, 7), 2697);
        // Truncation: 99 with 10% -> 99 - 9 = 90 (99 * 10 / 100 = 9)
        assert_eq!(Order::final_price_with_discount(&[line(99, 1)], 10), 90);
        // Zero discount leaves the total unchanged
        assert_eq!(Order::final_price_with_discount(&lines, 0), 2900);
    }
}
