//! BlueThread Storefront library.
//!
//! The client-side half of the storefront: a persistent shopping cart over
//! client-local storage, Printify catalog mapping, and the checkout handoff.
//!
//! # Architecture
//!
//! - [`cart::CartStore`] is constructed once per session and passed to the
//!   product, cart and checkout surfaces; there is no global cart
//! - [`storage`] abstracts client-local key-value storage (in-memory or
//!   file-backed)
//! - [`printify`] maps catalog JSON onto [`bluethread_core::Product`]
//! - [`checkout`] summarizes the cart and clears it after a successful order

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod printify;
pub mod storage;

pub use cart::CartStore;
pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
