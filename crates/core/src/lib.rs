//! BlueThread Core - Shared types library.
//!
//! This crate provides common types used across all BlueThread components:
//! - `storefront` - Cart store, client-local storage, catalog mapping, checkout
//! - `cli` - Command-line surface over the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Ids, prices, quantities, line items, the cart aggregate and
//!   the local product model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
