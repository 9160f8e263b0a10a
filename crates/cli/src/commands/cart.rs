//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! bt-cli cart show
//! bt-cli cart add --product-id 1 --name "Organic Tee" --price 24.99 --size M --color Black
//! bt-cli cart remove --product-id 1 --size M --color Black
//! bt-cli cart update --product-id 1 --quantity 3 --size M --color Black
//! bt-cli cart clear
//! ```

use std::io::Write;

use bluethread_core::{Cart, CurrencyCode, LineItem, LineItemKey, Price, Quantity};
use bluethread_storefront::cart::CartStore;
use bluethread_storefront::storage::KeyValueStorage;
use bluethread_storefront::{Result, StorefrontError};
use rust_decimal::Decimal;

/// A line entered on the command line.
#[derive(Debug)]
pub struct NewLine {
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub image_url: String,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
    pub variant_id: Option<String>,
}

impl NewLine {
    /// Validate and convert into a cart line item.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::BadRequest` for a zero quantity, a negative
    /// price, or a line total too large to represent.
    pub fn into_line_item(self) -> Result<LineItem> {
        let quantity = Quantity::new(self.quantity)
            .ok_or_else(|| StorefrontError::BadRequest("quantity must be at least 1".to_string()))?;
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(StorefrontError::BadRequest(format!(
                "price must not be negative (got {})",
                self.price
            )));
        }

        let mut item = LineItem::new(self.product_id, self.name, self.price, quantity)
            .with_image_url(self.image_url);
        item.size = self.size;
        item.color = self.color;
        item.variant_id = self.variant_id.map(Into::into);
        if item.checked_line_total().is_none() {
            return Err(StorefrontError::BadRequest(format!(
                "{} x {} is too large",
                item.quantity, item.unit_price
            )));
        }
        Ok(item)
    }
}

/// Remove a line by identity.
pub fn remove<S: KeyValueStorage>(
    store: &mut CartStore<S>,
    product_id: String,
    size: Option<String>,
    color: Option<String>,
) {
    store.remove_item(&LineItemKey::from_parts(product_id, size, color));
}

/// Set the quantity of a line. Quantities below 1 are ignored with a warning.
pub fn update<S: KeyValueStorage>(
    store: &mut CartStore<S>,
    product_id: String,
    quantity: i64,
    size: Option<String>,
    color: Option<String>,
) {
    if quantity < 1 {
        tracing::warn!(quantity, "Ignoring quantity below 1; use `cart remove` to delete a line");
    }
    store.update_quantity(&LineItemKey::from_parts(product_id, size, color), quantity);
}

/// Write the cart lines and totals.
///
/// # Errors
///
/// Returns `StorefrontError::Io` if writing fails.
pub fn render(cart: &Cart, currency: CurrencyCode, out: &mut impl Write) -> Result<()> {
    if cart.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }

    writeln!(out, "Cart ({} items)", cart.total_items())?;
    for item in cart.items() {
        let label = item
            .variant_label()
            .map(|label| format!(" ({label})"))
            .unwrap_or_default();
        writeln!(
            out,
            "  {} x {}{} @ {} = {}",
            item.quantity,
            item.name,
            label,
            Price::new(item.unit_price, currency),
            Price::new(item.line_total(), currency),
        )?;
    }
    writeln!(out, "Total: {}", Price::new(cart.total_price(), currency))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bluethread_storefront::storage::MemoryStorage;

    use super::*;

    fn new_line(quantity: u32) -> NewLine {
        NewLine {
            product_id: "1".to_string(),
            name: "Organic Tee".to_string(),
            price: Decimal::new(2000, 2),
            image_url: String::new(),
            quantity,
            size: Some("M".to_string()),
            color: Some("Black".to_string()),
            variant_id: Some("8253".to_string()),
        }
    }

    fn rendered(cart: &Cart) -> String {
        let mut out = Vec::new();
        render(cart, CurrencyCode::USD, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_new_line_rejects_zero_quantity() {
        assert!(matches!(
            new_line(0).into_line_item(),
            Err(StorefrontError::BadRequest(_))
        ));
    }

    #[test]
    fn test_new_line_rejects_negative_price() {
        let mut line = new_line(1);
        line.price = Decimal::new(-1, 0);
        assert!(line.into_line_item().is_err());
    }

    #[test]
    fn test_new_line_rejects_overflowing_total() {
        let mut line = new_line(2);
        line.price = Decimal::MAX;
        assert!(matches!(
            line.into_line_item(),
            Err(StorefrontError::BadRequest(_))
        ));

        let mut line = new_line(1);
        line.price = Decimal::MAX;
        assert!(line.into_line_item().is_ok());
    }

    #[test]
    fn test_oversized_merge_leaves_cart_renderable() {
        let mut store = CartStore::open(MemoryStorage::new(), "cart");
        let mut line = new_line(1);
        line.price = Decimal::MAX;
        store.add_item(line.into_line_item().unwrap());
        let mut again = new_line(1);
        again.price = Decimal::MAX;
        store.add_item(again.into_line_item().unwrap());

        assert_eq!(store.total_items(), 1);
        let text = rendered(store.cart());
        assert!(text.starts_with("Cart (1 items)\n"));
    }

    #[test]
    fn test_new_line_keeps_variant_fields() {
        let item = new_line(2).into_line_item().unwrap();
        assert_eq!(item.size.as_deref(), Some("M"));
        assert_eq!(item.color.as_deref(), Some("Black"));
        assert_eq!(item.variant_id.unwrap().as_str(), "8253");
        assert_eq!(item.quantity.get(), 2);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(rendered(&Cart::new()), "Cart is empty\n");
    }

    #[test]
    fn test_render_lines_and_total() {
        let mut store = CartStore::open(MemoryStorage::new(), "cart");
        store.add_item(new_line(2).into_line_item().unwrap());
        store.add_item(LineItem::new("2", "Tote", Decimal::new(1550, 2), Quantity::ONE));

        assert_eq!(
            rendered(store.cart()),
            "Cart (3 items)\n  2 x Organic Tee (M / Black) @ $20.00 = $40.00\n  1 x Tote @ $15.50 = $15.50\nTotal: $55.50\n"
        );
    }

    #[test]
    fn test_update_and_remove_by_identity() {
        let mut store = CartStore::open(MemoryStorage::new(), "cart");
        store.add_item(new_line(1).into_line_item().unwrap());

        update(&mut store, "1".to_string(), -5, Some("M".to_string()), Some("Black".to_string()));
        assert_eq!(store.total_items(), 1);

        update(&mut store, "1".to_string(), 4, Some("M".to_string()), Some("Black".to_string()));
        assert_eq!(store.total_items(), 4);

        remove(&mut store, "1".to_string(), Some("M".to_string()), None);
        assert_eq!(store.total_items(), 4);

        remove(&mut store, "1".to_string(), Some("M".to_string()), Some("Black".to_string()));
        assert!(store.items().is_empty());
    }
}
