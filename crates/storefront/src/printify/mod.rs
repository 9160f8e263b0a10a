//! Printify catalog mapping.
//!
//! # Architecture
//!
//! - Printify is the source of truth for products; fetching is done
//!   elsewhere and this module only parses the JSON it returns
//! - [`types`] mirrors the Printify schema, [`conversions`] maps it onto
//!   [`bluethread_core::Product`]
//! - Prices arrive as integer minor units and become `Decimal` amounts
//!
//! # Example
//!
//! ```rust
//! use bluethread_storefront::printify;
//!
//! let json = r#"{
//!     "id": "5d39b159e7c48c000728c89f",
//!     "title": "Organic Tee",
//!     "options": [{"name": "Sizes", "type": "size", "values": [{"id": 14, "title": "M"}]}],
//!     "variants": [{"id": 1001, "price": 2499, "options": [14]}],
//!     "images": []
//! }"#;
//!
//! let products = printify::parse_catalog(json).unwrap();
//! assert_eq!(products[0].variants[0].size.as_deref(), Some("M"));
//! ```

pub mod conversions;
pub mod types;

pub use conversions::{convert_page, convert_product};
pub use types::*;

use bluethread_core::Product;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when reading Printify catalog JSON.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not valid Printify product JSON.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Any of the shapes a stored catalog export can take.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Page(PrintifyProductPage),
    List(Vec<PrintifyProduct>),
    Single(Box<PrintifyProduct>),
}

/// Parse a single Printify product.
///
/// # Errors
///
/// Returns `CatalogError::Json` if `json` is not a Printify product.
pub fn parse_product(json: &str) -> Result<Product, CatalogError> {
    let raw: PrintifyProduct = serde_json::from_str(json)?;
    Ok(convert_product(raw))
}

/// Parse a product list page.
///
/// # Errors
///
/// Returns `CatalogError::Json` if `json` is not a Printify product page.
pub fn parse_product_page(json: &str) -> Result<Vec<Product>, CatalogError> {
    let page: PrintifyProductPage = serde_json::from_str(json)?;
    Ok(convert_page(page))
}

/// Parse a catalog document: a list page, a bare array, or one product.
///
/// Unpublished products in a page or array are skipped.
///
/// # Errors
///
/// Returns `CatalogError::Json` if `json` matches none of the shapes.
pub fn parse_catalog(json: &str) -> Result<Vec<Product>, CatalogError> {
    let products = match serde_json::from_str(json)? {
        CatalogDocument::Page(page) => convert_page(page),
        CatalogDocument::List(data) => convert_page(PrintifyProductPage {
            current_page: 1,
            last_page: 1,
            data,
        }),
        CatalogDocument::Single(product) => vec![convert_product(*product)],
    };
    Ok(products)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PRODUCT: &str = r#"{
        "id": "abc",
        "title": "Canvas Tote",
        "description": "Sturdy.",
        "tags": ["Bags"],
        "options": [{"name": "Colors", "type": "color", "values": [{"id": 1, "title": "Natural"}]}],
        "variants": [
            {"id": 10, "sku": "TOTE-NAT", "price": 1800, "title": "Natural", "is_enabled": true, "is_available": true, "options": [1]}
        ],
        "images": [{"src": "https://images.example/tote.png", "variant_ids": [10], "position": "front", "is_default": true}],
        "visible": true
    }"#;

    #[test]
    fn test_parse_product() {
        let product = parse_product(PRODUCT).unwrap();
        assert_eq!(product.title, "Canvas Tote");
        assert_eq!(product.variants[0].color.as_deref(), Some("Natural"));
        assert_eq!(product.default_image(), Some("https://images.example/tote.png"));
    }

    #[test]
    fn test_parse_product_page() {
        let json = format!(r#"{{"current_page": 1, "last_page": 3, "data": [{PRODUCT}]}}"#);
        let page: PrintifyProductPage = serde_json::from_str(&json).unwrap();
        assert!(page.has_next_page());

        let products = parse_product_page(&json).unwrap();
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn test_parse_catalog_accepts_all_shapes() {
        assert_eq!(parse_catalog(PRODUCT).unwrap().len(), 1);
        assert_eq!(parse_catalog(&format!("[{PRODUCT},{PRODUCT}]")).unwrap().len(), 2);
        assert_eq!(
            parse_catalog(&format!(r#"{{"data": [{PRODUCT}]}}"#)).unwrap().len(),
            1
        );
        assert!(parse_catalog(r#"{"current_page": 1, "data": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_catalog_rejects_garbage() {
        assert!(matches!(parse_catalog("{"), Err(CatalogError::Json(_))));
        assert!(parse_catalog(r#"{"title": "no id"}"#).is_err());
    }
}
