//! Core types for BlueThread.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod line_item;
pub mod price;
pub mod product;
pub mod quantity;

pub use cart::Cart;
pub use id::*;
pub use line_item::{LineItem, LineItemKey};
pub use price::{CurrencyCode, CurrencyCodeError, Price};
pub use product::{Product, ProductVariant};
pub use quantity::{Quantity, QuantityError};
