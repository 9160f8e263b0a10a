//! Integration tests for the BlueThread storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bluethread-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store over file-backed storage across sessions
//! - `catalog_checkout` - Printify catalog to cart to completed order
//!
//! This crate holds the shared fixtures.

use bluethread_core::{LineItem, Quantity};
use rust_decimal::Decimal;
use serde_json::json;

/// A tee shirt line in the given size and color. A zero quantity becomes one.
#[must_use]
pub fn tee(size: &str, color: &str, quantity: u32) -> LineItem {
    LineItem::new(
        "tee",
        "Organic Tee",
        Decimal::new(2499, 2),
        Quantity::new(quantity).unwrap_or(Quantity::ONE),
    )
    .with_image_url("https://cdn.example/tee.jpg")
    .with_size(size)
    .with_color(color)
}

/// A Printify product page with one visible tee, one hidden product and a
/// disabled variant.
#[must_use]
pub fn printify_page() -> String {
    json!({
        "current_page": 1,
        "last_page": 1,
        "data": [
            {
                "id": "5d39b159e7c48c000728c89f",
                "title": "Organic Tee",
                "description": "<p>Soft and sustainable.</p>",
                "tags": ["Men's Clothing"],
                "options": [
                    {"name": "Colors", "type": "color", "values": [
                        {"id": 521, "title": "Black"},
                        {"id": 522, "title": "Natural"}
                    ]},
                    {"name": "Sizes", "type": "size", "values": [
                        {"id": 14, "title": "M"},
                        {"id": 15, "title": "L"}
                    ]}
                ],
                "variants": [
                    {"id": 8253, "price": 2499, "title": "Black / M", "options": [521, 14]},
                    {"id": 8254, "price": 2699, "title": "Black / L", "options": [521, 15]},
                    {"id": 8255, "price": 2499, "title": "Natural / M", "options": [522, 14],
                     "is_enabled": false}
                ],
                "images": [
                    {"src": "https://images.printify.com/tee-back.png", "variant_ids": [8253, 8254],
                     "position": "back", "is_default": false},
                    {"src": "https://images.printify.com/tee-front.png", "variant_ids": [8253, 8254],
                     "position": "front", "is_default": true}
                ],
                "visible": true
            },
            {
                "id": "5d39b159e7c48c000728c8a0",
                "title": "Draft Hoodie",
                "variants": [{"id": 9000, "price": 4999, "title": "Default"}],
                "visible": false
            }
        ]
    })
    .to_string()
}
