//! Client-side cart: the persistent store and its snapshot format.
//!
//! The cart aggregate itself ([`bluethread_core::Cart`]) is pure state.
//! This module adds durability: [`CartStore`] rehydrates from client-local
//! storage at startup and writes a snapshot after every mutation.

pub mod snapshot;
mod store;

pub use snapshot::SnapshotError;
pub use store::{CartStore, DEFAULT_CART_KEY};
