//! CLI command implementations.
//!
//! Each command writes its human-readable output to the given writer and
//! leaves logging to `tracing`.

pub mod cart;
pub mod catalog;
pub mod checkout;

use bluethread_storefront::StorefrontConfig;
use bluethread_storefront::cart::CartStore;
use bluethread_storefront::storage::FileStorage;

/// Open the session cart backed by the configured storage directory.
pub fn open_store(config: &StorefrontConfig) -> CartStore<FileStorage> {
    tracing::debug!(dir = %config.cart_dir.display(), key = %config.cart_key, "Opening cart");
    CartStore::open(FileStorage::new(&config.cart_dir), &config.cart_key)
}
