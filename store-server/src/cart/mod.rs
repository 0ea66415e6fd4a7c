//! Session Cart
//!
//! Per-session cart lines keyed by `product_id` plus an optional
//! options suffix. Lines carry a frozen price snapshot taken when the
//! product was first added; checkout copies these snapshots into order
//! lines without re-deriving them.
//!
//! Each session is assumed single-writer (one browser issuing serialized
//! requests). The store itself is a sharded concurrent map so distinct
//! sessions never contend.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// One cart entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product_id: i64,
    pub options: Option<String>,
    pub quantity: i64,
    /// Discounted price snapshot at add time, minor units
    pub unit_price: i64,
    // Display fields, repairable from the catalog when stale
    pub title: String,
    pub image: Option<String>,
}

impl CartLine {
    /// Composite key: `product_id` optionally suffixed with options
    pub fn key(product_id: i64, options: Option<&str>) -> String {
        match options {
            Some(o) if !o.is_empty() => format!("{product_id}:{o}"),
            _ => product_id.to_string(),
        }
    }

    pub fn line_total(&self) -> i64 {
        self.unit_price * self.quantity
    }
}

/// In-memory cart store, one entry per session key
#[derive(Debug, Default)]
pub struct CartStore {
    carts: DashMap<String, Vec<CartLine>>,
}

impl CartStore {
    pub fn new() -> Self {
        Self {
            carts: DashMap::new(),
        }
    }

    /// Add a line; an existing product+options key accumulates quantity
    /// and keeps its original price snapshot.
    pub fn add(&self, session: &str, line: CartLine) {
        let key = CartLine::key(line.product_id, line.options.as_deref());
        let mut cart = self.carts.entry(session.to_string()).or_default();
        match cart
            .iter_mut()
            .find(|l| CartLine::key(l.product_id, l.options.as_deref()) == key)
        {
            Some(existing) => existing.quantity += line.quantity,
            None => cart.push(line),
        }
    }

    /// Remove a line; no-op when the key is absent
    pub fn remove(&self, session: &str, product_id: i64, options: Option<&str>) {
        let key = CartLine::key(product_id, options);
        if let Some(mut cart) = self.carts.get_mut(session) {
            cart.retain(|l| CartLine::key(l.product_id, l.options.as_deref()) != key);
        }
    }

    /// Overwrite a line's quantity; `quantity <= 0` removes the line
    pub fn update_quantity(
        &self,
        session: &str,
        product_id: i64,
        options: Option<&str>,
        quantity: i64,
    ) {
        if quantity <= 0 {
            self.remove(session, product_id, options);
            return;
        }
        let key = CartLine::key(product_id, options);
        if let Some(mut cart) = self.carts.get_mut(session) {
            if let Some(line) = cart
                .iter_mut()
                .find(|l| CartLine::key(l.product_id, l.options.as_deref()) == key)
            {
                line.quantity = quantity;
            }
        }
    }

    /// Empty the session's cart
    pub fn clear(&self, session: &str) {
        self.carts.remove(session);
    }

    /// Snapshot of the session's lines
    pub fn items(&self, session: &str) -> Vec<CartLine> {
        self.carts
            .get(session)
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Number of lines in the cart
    pub fn count(&self, session: &str) -> usize {
        self.carts.get(session).map(|c| c.len()).unwrap_or(0)
    }

    /// Sum of price x quantity over all lines
    pub fn total(&self, session: &str) -> i64 {
        self.carts
            .get(session)
            .map(|c| c.iter().map(CartLine::line_total).sum())
            .unwrap_or(0)
    }

    /// Repair stale display fields on a line (defensive staleness fix
    /// applied when listing the cart)
    pub fn repair_line(&self, session: &str, product_id: i64, options: Option<&str>, title: String, image: Option<String>) {
        let key = CartLine::key(product_id, options);
        if let Some(mut cart) = self.carts.get_mut(session) {
            if let Some(line) = cart
                .iter_mut()
                .find(|l| CartLine::key(l.product_id, l.options.as_deref()) == key)
            {
                line.title = title;
                line.image = image;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: i64, options: Option<&str>, quantity: i64, unit_price: i64) -> CartLine {
        CartLine {
            product_id,
            options: options.map(|s| s.to_string()),
            quantity,
            unit_price,
            title: format!("product_{}", product_id),
            image: None,
        }
    }

    #[test]
    fn test_add_accumulates_quantity_for_same_key() {
        let store = CartStore::new();
        store.add("s1", line(1, None, 2, 900));
        store.add("s1", line(1, None, 3, 900));

        let items = store.items("s1");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
    }

    #[test]
    fn test_same_product_different_options_are_distinct_lines() {
        let store = CartStore::new();
        store.add("s1", line(1, Some("red"), 1, 900));
        store.add("s1", line(1, Some("blue"), 1, 900));
        store.add("s1", line(1, None, 1, 900));

        assert_eq!(store.count("s1"), 3);
    }

    #[test]
    fn test_first_add_freezes_price_snapshot() {
        let store = CartStore::new();
        store.add("s1", line(1, None, 1, 900));
        // Later add at a different current price keeps the original snapshot
        store.add("s1", line(1, None, 1, 800));

        let items = store.items("s1");
        assert_eq!(items[0].unit_price, 900);
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let store = CartStore::new();
        store.add("s1", line(1, None, 1, 900));
        store.remove("s1", 2, None);
        store.remove("s1", 1, Some("red"));
        store.remove("nonexistent-session", 1, None);

        assert_eq!(store.count("s1"), 1);
    }

    #[test]
    fn test_update_quantity_overwrites() {
        let store = CartStore::new();
        store.add("s1", line(1, None, 2, 900));
        store.update_quantity("s1", 1, None, 7);

        assert_eq!(store.items("s1")[0].quantity, 7);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let store = CartStore::new();
        store.add("s1", line(1, None, 2, 900));
        store.update_quantity("s1", 1, None, 0);
        assert_eq!(store.count("s1"), 0);

        store.add("s1", line(2, None, 2, 500));
        store.update_quantity("s1", 2, None, -3);
        assert_eq!(store.count("s1"), 0);
    }

    #[test]
    fn test_total_sums_price_times_quantity() {
        let store = CartStore::new();
        // 900 x 3 + 500 x 2 = 3700
        store.add("s1", line(1, None, 3, 900));
        store.add("s1", line(2, None, 2, 500));

        assert_eq!(store.total("s1"), 3700);
    }

    #[test]
    fn test_discounted_snapshot_example() {
        // 1000 with 10% basket discount -> 900; quantity 3 -> 2700
        let store = CartStore::new();
        let effective = crate::pricing::effective_price(1000, 10);
        assert_eq!(effective, 900);
        store.add("s1", line(1, None, 3, effective));
        assert_eq!(store.total("s1"), 2700);
    }

    #[test]
    fn test_clear_empties_cart() {
        let store = CartStore::new();
        store.add("s1", line(1, None, 1, 900));
        store.add("s1", line(2, None, 1, 500));
        store.clear("s1");

        assert_eq!(store.count("s1"), 0);
        assert_eq!(store.total("s1"), 0);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = CartStore::new();
        store.add("s1", line(1, None, 1, 900));
        store.add("s2", line(2, None, 5, 100));

        assert_eq!(store.count("s1"), 1);
        assert_eq!(store.total("s2"), 500);
        store.clear("s1");
        assert_eq!(store.count("s2"), 1);
    }
}
