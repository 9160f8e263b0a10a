//! Checkout command.
//!
//! Prints the order summary. With `--confirm` the order is completed and
//! the cart cleared; payment is handled outside this tool.

use std::convert::Infallible;
use std::io::Write;

use bluethread_storefront::checkout::{self, CheckoutError, OrderSummary};
use bluethread_storefront::storage::KeyValueStorage;
use bluethread_storefront::{CartStore, Result, StorefrontConfig, StorefrontError};

/// Show the order summary and, when `confirm` is set, place the order.
///
/// # Errors
///
/// Returns `StorefrontError::BadRequest` when confirming an empty cart, or
/// `StorefrontError::Io` if writing fails.
pub fn run<S: KeyValueStorage>(
    store: &mut CartStore<S>,
    config: &StorefrontConfig,
    confirm: bool,
    out: &mut impl Write,
) -> Result<()> {
    let summary = OrderSummary::from_cart(store.cart(), &config.shipping, config.currency);
    render(&summary, out)?;

    if !confirm {
        return Ok(());
    }

    let placed = checkout::place_order(store, &config.shipping, config.currency, |summary| {
        Ok::<_, Infallible>(summary.total)
    });
    match placed {
        Ok(total) => {
            writeln!(out, "Order placed for {total}. Cart cleared.")?;
            Ok(())
        }
        Err(CheckoutError::EmptyCart) => Err(StorefrontError::BadRequest(
            "cannot check out an empty cart".to_string(),
        )),
        Err(CheckoutError::Submission(never)) => match never {},
    }
}

fn render(summary: &OrderSummary, out: &mut impl Write) -> Result<()> {
    if summary.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }

    writeln!(out, "Order summary")?;
    for line in &summary.lines {
        let variant = line
            .variant
            .as_deref()
            .map(|v| format!(" ({v})"))
            .unwrap_or_default();
        writeln!(
            out,
            "  {} x {}{} @ {} = {}",
            line.quantity, line.name, variant, line.unit_price, line.line_total
        )?;
    }
    writeln!(out, "Subtotal: {}", summary.subtotal)?;
    writeln!(out, "Shipping: {}", summary.shipping)?;
    writeln!(out, "Total:    {}", summary.total)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bluethread_core::{LineItem, Quantity};
    use bluethread_storefront::storage::MemoryStorage;
    use rust_decimal::Decimal;

    use super::*;

    fn store() -> CartStore<MemoryStorage> {
        let mut store = CartStore::open(MemoryStorage::new(), "cart");
        store.add_item(
            LineItem::new("1", "Organic Tee", Decimal::new(2500, 2), Quantity::new(2).unwrap())
                .with_size("M"),
        );
        store
    }

    fn output(store: &mut CartStore<MemoryStorage>, confirm: bool) -> Result<String> {
        let mut out = Vec::new();
        run(store, &StorefrontConfig::default(), confirm, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_summary_without_confirm_keeps_cart() {
        let mut store = store();
        let text = output(&mut store, false).unwrap();

        assert_eq!(
            text,
            "Order summary\n  2 x Organic Tee (M) @ $25.00 = $50.00\nSubtotal: $50.00\nShipping: $4.99\nTotal:    $54.99\n"
        );
        assert_eq!(store.total_items(), 2);
    }

    #[test]
    fn test_confirm_clears_cart() {
        let mut store = store();
        let text = output(&mut store, true).unwrap();

        assert!(text.ends_with("Order placed for $54.99. Cart cleared.\n"));
        assert!(store.items().is_empty());
        assert_eq!(store.storage().get_item("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_confirm_empty_cart_is_rejected() {
        let mut store = CartStore::open(MemoryStorage::new(), "cart");
        assert!(matches!(
            output(&mut store, true),
            Err(StorefrontError::BadRequest(_))
        ));
    }
}
