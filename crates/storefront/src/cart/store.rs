//! The persistent cart store.

use bluethread_core::{Cart, LineItem, LineItemKey};
use rust_decimal::Decimal;
use tracing::instrument;

use super::snapshot;
use crate::storage::KeyValueStorage;

/// Default storage key for the cart snapshot.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Single source of truth for the shopping cart within one client session.
///
/// Constructed once per session with [`CartStore::open`] and handed to the
/// product, cart and checkout surfaces. Every mutation updates the in-memory
/// [`Cart`] synchronously and then writes a full snapshot to storage.
///
/// Storage failures are logged and swallowed: a cart that cannot be
/// persisted keeps working in memory for the rest of the session.
///
/// Nothing is written until hydration has finished, so opening a store never
/// overwrites a saved cart with the initial empty state.
///
/// # Example
///
/// ```
/// use bluethread_core::{LineItem, LineItemKey, Quantity};
/// use bluethread_storefront::cart::CartStore;
/// use bluethread_storefront::storage::MemoryStorage;
/// use rust_decimal::Decimal;
///
/// let storage = MemoryStorage::new();
/// let mut store = CartStore::open(storage.clone(), "cart");
/// store.add_item(
///     LineItem::new("1", "Organic Tee", Decimal::new(2499, 2), Quantity::ONE).with_size("M"),
/// );
///
/// // A new store on the same storage sees the saved cart.
/// let reloaded = CartStore::open(storage, "cart");
/// assert_eq!(reloaded.items(), store.items());
/// assert_eq!(reloaded.total_items(), 1);
/// ```
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    cart: Cart,
    hydrated: bool,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Create a store and rehydrate it from `storage`.
    ///
    /// Never fails: an unreadable, malformed or missing snapshot yields an
    /// empty cart.
    #[instrument(skip(storage, key), fields(key = %key.as_ref()))]
    pub fn open(storage: S, key: impl AsRef<str>) -> Self {
        let mut store = Self {
            storage,
            key: key.as_ref().to_owned(),
            cart: Cart::new(),
            hydrated: false,
        };
        store.hydrate();
        store
    }

    /// Re-read the persisted snapshot, replacing the in-memory cart.
    ///
    /// Changes written by another session sharing the same storage are only
    /// observed when this is called.
    pub fn rehydrate(&mut self) {
        self.hydrated = false;
        self.hydrate();
    }

    fn hydrate(&mut self) {
        self.cart = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => match snapshot::decode(&raw) {
                Ok(items) => {
                    let cart = Cart::from_items(items);
                    tracing::debug!(
                        key = %self.key,
                        lines = cart.len(),
                        "Cart rehydrated from storage"
                    );
                    cart
                }
                Err(e) => {
                    tracing::warn!(key = %self.key, error = %e, "Ignoring unreadable saved cart");
                    Cart::new()
                }
            },
            Ok(None) => {
                tracing::debug!(key = %self.key, "No saved cart, starting empty");
                Cart::new()
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read saved cart");
                Cart::new()
            }
        };
        self.hydrated = true;
    }

    /// Write the current items to storage. Failures are logged, not returned.
    fn persist(&self) {
        if !self.hydrated {
            return;
        }

        let raw = match snapshot::encode(self.cart.items()) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to encode cart");
                return;
            }
        };

        if let Err(e) = self.storage.set_item(&self.key, &raw) {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }

    /// Add an item, merging with an existing entry of the same identity.
    #[instrument(skip(self, item), fields(product_id = %item.product_id))]
    pub fn add_item(&mut self, item: LineItem) {
        if self.cart.add(item) {
            self.persist();
        } else {
            tracing::warn!("Ignoring cart line that would overflow the cart total");
        }
    }

    /// Remove the entry with the given identity. Unknown identities are ignored.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, key: &LineItemKey) {
        if self.cart.remove(key) {
            self.persist();
        } else {
            tracing::debug!("No matching cart line to remove");
        }
    }

    /// Set the quantity of an entry.
    ///
    /// Quantities below 1 and unknown identities are ignored; the cart and
    /// storage are left untouched.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, key: &LineItemKey, quantity: i64) {
        if self.cart.update_quantity(key, quantity) {
            self.persist();
        } else {
            tracing::debug!("Quantity update ignored");
        }
    }

    /// Empty the cart. The empty state is persisted.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// The underlying cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    /// Sum of `unit_price * quantity`.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }

    /// Whether hydration has completed and writes are enabled.
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Storage key holding the snapshot.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store and return its storage backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}
