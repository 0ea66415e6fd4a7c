//! Discount Calculator
//!
//! Derives a product's effective price from its discount baskets.
//! Overlapping baskets take the maximum percentage, never the sum.
//! Pure function of the basket set and the current timestamp; recomputed
//! on every call, no caching.

use rust_decimal::prelude::*;
use shared::models::DiscountBasket;

/// Result of a discount calculation for a single product
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PriceQuote {
    /// Base price in minor units
    pub price: i64,
    /// Winning discount percent (0 when no basket applies)
    pub discount: i64,
    /// floor(price * (1 - discount/100))
    pub effective_price: i64,
    /// The basket that supplied the discount, if any
    pub basket_id: Option<i64>,
}

/// Compute the maximum applicable discount for a product.
///
/// A basket applies when it is active and `start_at <= now <= end_at`.
/// The caller passes only baskets that contain the product.
pub fn applicable_discount(baskets: &[DiscountBasket], now: i64) -> (i64, Option<i64>) {
    baskets
        .iter()
        .filter(|b| b.is_applicable(now))
        .map(|b| (b.discount.clamp(0, 100), Some(b.id)))
        .max_by_key(|(d, _)| *d)
        .unwrap_or((0, None))
}

/// Effective price after a percentage discount, floored to minor units
pub fn effective_price(price: i64, discount: i64) -> i64 {
    let discount = discount.clamp(0, 100);
    let hundred = Decimal::ONE_HUNDRED;
    let rate = Decimal::from(discount) / hundred;
    let result = Decimal::from(price) * (Decimal::ONE - rate);
    result.floor().to_i64().unwrap_or(0)
}

/// Quote a product price against its baskets at `now`
pub fn quote(price: i64, baskets: &[DiscountBasket], now: i64) -> PriceQuote {
    let (discount, basket_id) = applicable_discount(baskets, now);
    PriceQuote {
        price,
        discount,
        effective_price: effective_price(price, discount),
        basket_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to create a test basket
    fn make_basket(id: i64, discount: i64, start_at: i64, end_at: i64, is_active: bool) -> DiscountBasket {
        DiscountBasket {
            id,
            title: format!("basket_{}", id),
            discount,
            start_at,
            end_at,
            is_active,
            created_at: 0,
            updated_at: 0,
        }
    }

    const NOW: i64 = 1_000_000;

    #[test]
    fn test_no_baskets_means_no_discount() {
        let q = quote(1000, &[], NOW);
        assert_eq!(q.discount, 0);
        assert_eq!(q.effective_price, 1000);
        assert_eq!(q.basket_id, None);
    }

    #[test]
    fn test_single_active_basket() {
        // 1000 with 10% -> 900
        let baskets = vec![make_basket(1, 10, 0, NOW + 1, true)];
        let q = quote(1000, &baskets, NOW);
        assert_eq!(q.discount, 10);
        assert_eq!(q.effective_price, 900);
        assert_eq!(q.basket_id, Some(1));
    }

    #[test]
    fn test_overlapping_baskets_take_max_not_sum() {
        // 10% and 25% overlapping -> 25%, not 35%
        let baskets = vec![
            make_basket(1, 10, 0, NOW + 1, true),
            make_basket(2, 25, 0, NOW + 1, true),
        ];
        let q = quote(1000, &baskets, NOW);
        assert_eq!(q.discount, 25);
        assert_eq!(q.effective_price, 750);
        assert_eq!(q.basket_id, Some(2));
    }

    #[test]
    fn test_inactive_basket_ignored() {
        let baskets = vec![
            make_basket(1, 50, 0, NOW + 1, false),
            make_basket(2, 10, 0, NOW + 1, true),
        ];
        let (d, id) = applicable_discount(&baskets, NOW);
        assert_eq!(d, 10);
        assert_eq!(id, Some(2));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let baskets = vec![make_basket(1, 10, NOW, NOW, true)];
        assert_eq!(applicable_discount(&baskets, NOW).0, 10);
        assert_eq!(applicable_discount(&baskets, NOW + 1).0, 0);
        assert_eq!(applicable_discount(&baskets, NOW - 1).0, 0);
    }

    #[test]
    fn test_expired_and_future_baskets_ignored() {
        let baskets = vec![
            make_basket(1, 30, 0, NOW - 1, true),        // expired
            make_basket(2, 40, NOW + 1, NOW + 100, true), // not started
        ];
        let q = quote(1000, &baskets, NOW);
        assert_eq!(q.discount, 0);
        assert_eq!(q.effective_price, 1000);
    }

    #[test]
    fn test_effective_price_floors() {
        // 999 with 10% -> floor(899.1) = 899
        assert_eq!(effective_price(999, 10), 899);
        // 1 with 50% -> floor(0.5) = 0
        assert_eq!(effective_price(1, 50), 0);
        // 100% discount -> 0
        assert_eq!(effective_price(1000, 100), 0);
        // 0% leaves the price unchanged
        assert_eq!(effective_price(1000, 0), 1000);
    }

    #[test]
    fn test_discount_clamped_to_valid_range() {
        assert_eq!(effective_price(1000, 150), 0);
        assert_eq!(effective_price(1000, -5), 1000);
    }
}
