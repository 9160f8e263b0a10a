//! Catalog commands over Printify JSON exports.
//!
//! # Usage
//!
//! ```bash
//! bt-cli catalog show products.json
//! bt-cli catalog add products.json --product 5d39b159e7c48c000728c89f --size M --color Black
//! ```

use std::io::Write;
use std::path::Path;

use bluethread_core::{CurrencyCode, Price, Product, Quantity};
use bluethread_storefront::cart::CartStore;
use bluethread_storefront::printify;
use bluethread_storefront::storage::KeyValueStorage;
use bluethread_storefront::{Result, StorefrontError};

/// Read a Printify product, product array or product page from disk.
///
/// # Errors
///
/// Returns `StorefrontError::Io` if the file cannot be read, or
/// `StorefrontError::Catalog` if it is not catalog JSON.
pub fn load(path: &Path) -> Result<Vec<Product>> {
    let json = std::fs::read_to_string(path)?;
    let products = printify::parse_catalog(&json)?;
    tracing::debug!(path = %path.display(), count = products.len(), "Loaded catalog");
    Ok(products)
}

/// Write each product with its price range and variants.
///
/// # Errors
///
/// Returns `StorefrontError::Io` if writing fails.
pub fn render(products: &[Product], currency: CurrencyCode, out: &mut impl Write) -> Result<()> {
    if products.is_empty() {
        writeln!(out, "No products")?;
        return Ok(());
    }

    for product in products {
        let price = match product.price_range() {
            Some((lo, hi)) if lo == hi => Price::new(lo, currency).to_string(),
            Some((lo, hi)) => format!("{} - {}", Price::new(lo, currency), Price::new(hi, currency)),
            None => "unavailable".to_string(),
        };
        writeln!(out, "{} [{}] {}", product.title, product.id, price)?;

        for variant in &product.variants {
            let label = [variant.size.as_deref(), variant.color.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" / ");
            let stock = if variant.available { "" } else { " (sold out)" };
            writeln!(
                out,
                "  {} {}{}",
                if label.is_empty() { "default" } else { label.as_str() },
                Price::new(variant.price, currency),
                stock
            )?;
        }
    }
    Ok(())
}

/// Add the variant of `product_id` matching `size` and `color` to the cart.
///
/// # Errors
///
/// Returns `StorefrontError::NotFound` if the product or variant is not in
/// the catalog, or `StorefrontError::BadRequest` if the variant is sold out
/// or `quantity` is zero.
pub fn add_to_cart<S: KeyValueStorage>(
    store: &mut CartStore<S>,
    products: &[Product],
    product_id: &str,
    size: Option<&str>,
    color: Option<&str>,
    quantity: u32,
) -> Result<()> {
    let quantity = Quantity::new(quantity)
        .ok_or_else(|| StorefrontError::BadRequest("quantity must be at least 1".to_string()))?;

    let product = products
        .iter()
        .find(|p| p.id.as_str() == product_id)
        .ok_or_else(|| StorefrontError::NotFound(format!("product {product_id}")))?;

    let variant = product.find_variant(size, color).ok_or_else(|| {
        StorefrontError::NotFound(format!(
            "variant size={} color={} of {}",
            size.unwrap_or("-"),
            color.unwrap_or("-"),
            product.title
        ))
    })?;

    if !variant.available {
        return Err(StorefrontError::BadRequest(format!(
            "{} ({}) is sold out",
            product.title, variant.title
        )));
    }

    tracing::info!(
        product_id,
        variant_id = %variant.id,
        quantity = quantity.get(),
        "Adding catalog variant to cart"
    );
    store.add_item(product.line_item(variant, quantity));
    Ok(())
}
