//! Checkout: order summary and the clear-on-success handoff.
//!
//! Payment and order creation are external. This module builds the summary
//! the checkout surface renders, hands it to the caller's submit function,
//! and clears the cart only when submission succeeds.

use bluethread_core::{Cart, CurrencyCode, Price};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::cart::CartStore;
use crate::storage::KeyValueStorage;

/// Errors that can occur when placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError<E> {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The external order submission failed; the cart is left intact.
    #[error("order submission failed: {0}")]
    Submission(E),
}

/// Flat-rate shipping with an optional free-shipping threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShippingPolicy {
    /// Charged on every non-empty order below the threshold.
    pub flat_rate: Decimal,
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Option<Decimal>,
}

impl ShippingPolicy {
    /// Shipping charged for an order with the given subtotal.
    #[must_use]
    pub fn shipping_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        match self.free_shipping_threshold {
            Some(threshold) if subtotal >= threshold => Decimal::ZERO,
            _ => self.flat_rate,
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            flat_rate: Decimal::new(499, 2),
            free_shipping_threshold: None,
        }
    }
}

/// One row of the order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    /// Product name as snapshotted in the cart.
    pub name: String,
    /// Size/color label, if any.
    pub variant: Option<String>,
    /// Units ordered.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: Price,
    /// `unit_price * quantity`.
    pub line_total: Price,
}

/// Everything the checkout surface needs to render and submit an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    /// Rows in cart order.
    pub lines: Vec<OrderLine>,
    /// Total units.
    pub item_count: u64,
    /// Sum of line totals.
    pub subtotal: Price,
    /// Shipping charge.
    pub shipping: Price,
    /// `subtotal + shipping`.
    pub total: Price,
}

impl OrderSummary {
    /// Summarize a cart.
    #[must_use]
    pub fn from_cart(cart: &Cart, shipping: &ShippingPolicy, currency: CurrencyCode) -> Self {
        let lines = cart
            .items()
            .iter()
            .map(|item| OrderLine {
                name: item.name.clone(),
                variant: item.variant_label(),
                quantity: item.quantity.get(),
                unit_price: Price::new(item.unit_price, currency),
                line_total: Price::new(item.line_total(), currency),
            })
            .collect();

        let subtotal = cart.total_price();
        let shipping_amount = shipping.shipping_for(subtotal);

        Self {
            lines,
            item_count: cart.total_items(),
            subtotal: Price::new(subtotal, currency),
            shipping: Price::new(shipping_amount, currency),
            total: Price::new(subtotal.saturating_add(shipping_amount), currency),
        }
    }

    /// Whether the summary has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Submit the cart as an order and clear it on success.
///
/// `submit` performs the external payment/order creation. The cart is
/// cleared (and the empty cart persisted) only if it returns `Ok`.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` without calling `submit` when the cart
/// is empty, or `CheckoutError::Submission` when `submit` fails.
pub fn place_order<S, T, E, F>(
    store: &mut CartStore<S>,
    shipping: &ShippingPolicy,
    currency: CurrencyCode,
    submit: F,
) -> Result<T, CheckoutError<E>>
where
    S: KeyValueStorage,
    F: FnOnce(&OrderSummary) -> Result<T, E>,
{
    let summary = OrderSummary::from_cart(store.cart(), shipping, currency);
    if summary.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let receipt = submit(&summary).map_err(CheckoutError::Submission)?;
    tracing::info!(
        items = summary.item_count,
        total = %summary.total,
        "Order submitted, clearing cart"
    );
    store.clear_cart();
    Ok(receipt)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bluethread_core::{LineItem, Quantity};

    use super::*;
    use crate::storage::MemoryStorage;

    fn policy() -> ShippingPolicy {
        ShippingPolicy {
            flat_rate: Decimal::new(599, 2),
            free_shipping_threshold: Some(Decimal::new(7500, 2)),
        }
    }

    fn store_with_tee(quantity: u32) -> CartStore<MemoryStorage> {
        let mut store = CartStore::open(MemoryStorage::new(), "cart");
        store.add_item(
            LineItem::new("1", "Organic Tee", Decimal::new(2500, 2), Quantity::new(quantity).unwrap())
                .with_size("M")
                .with_color("Black"),
        );
        store
    }

    #[test]
    fn test_shipping_for() {
        let policy = policy();
        assert_eq!(policy.shipping_for(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(policy.shipping_for(Decimal::new(5000, 2)), Decimal::new(599, 2));
        assert_eq!(policy.shipping_for(Decimal::new(7500, 2)), Decimal::ZERO);

        let no_threshold = ShippingPolicy::default();
        assert_eq!(
            no_threshold.shipping_for(Decimal::new(100_000, 2)),
            Decimal::new(499, 2)
        );
    }

    #[test]
    fn test_summary_totals() {
        let store = store_with_tee(2);
        let summary = OrderSummary::from_cart(store.cart(), &policy(), CurrencyCode::USD);

        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.lines[0].variant.as_deref(), Some("M / Black"));
        assert_eq!(summary.subtotal.display(), "$50.00");
        assert_eq!(summary.shipping.display(), "$5.99");
        assert_eq!(summary.total.display(), "$55.99");
    }

    #[test]
    fn test_summary_free_shipping_over_threshold() {
        let store = store_with_tee(3);
        let summary = OrderSummary::from_cart(store.cart(), &policy(), CurrencyCode::USD);
        assert_eq!(summary.shipping.amount, Decimal::ZERO);
        assert_eq!(summary.total.display(), "$75.00");
    }

    #[test]
    fn test_place_order_clears_on_success() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone(), "cart");
        store.add_item(LineItem::new("2", "Mug", Decimal::new(1200, 2), Quantity::ONE));

        let order_id = place_order(&mut store, &policy(), CurrencyCode::USD, |summary| {
            assert_eq!(summary.item_count, 1);
            Ok::<_, String>("order-1")
        })
        .unwrap();

        assert_eq!(order_id, "order-1");
        assert!(store.items().is_empty());
        assert!(CartStore::open(storage, "cart").items().is_empty());
    }

    #[test]
    fn test_place_order_keeps_cart_on_failure() {
        let mut store = store_with_tee(1);
        let result = place_order(&mut store, &policy(), CurrencyCode::USD, |_| {
            Err::<(), _>("card declined")
        });

        assert!(matches!(result, Err(CheckoutError::Submission("card declined"))));
        assert_eq!(store.total_items(), 1);
    }

    #[test]
    fn test_place_order_rejects_empty_cart() {
        let mut store = CartStore::open(MemoryStorage::new(), "cart");
        let mut called = false;
        let result = place_order(&mut store, &policy(), CurrencyCode::USD, |_| {
            called = true;
            Ok::<_, String>(())
        });

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert!(!called);
    }

    #[test]
    fn test_summary_total_saturates_with_shipping() {
        let mut store = CartStore::open(MemoryStorage::new(), "cart");
        store.add_item(LineItem::new("1", "Big", Decimal::MAX, Quantity::ONE));

        let summary =
            OrderSummary::from_cart(store.cart(), &ShippingPolicy::default(), CurrencyCode::USD);
        assert_eq!(summary.subtotal.amount, Decimal::MAX);
        assert_eq!(summary.shipping.amount, Decimal::new(499, 2));
        assert_eq!(summary.total.amount, Decimal::MAX);
    }
}
