//! The cart aggregate.
//!
//! [`Cart`] is pure state: it knows how to merge, remove and re-quantify line
//! items and how to derive totals, but it never touches storage. Persistence
//! lives in the storefront crate's cart store.

use rust_decimal::Decimal;

use super::line_item::{LineItem, LineItemKey};
use super::quantity::Quantity;

/// An ordered collection of line items with unique identities.
///
/// ## Invariants
///
/// - No two items share a `(product_id, size, color)` identity.
/// - Every quantity is `>= 1` (enforced by [`Quantity`]).
/// - Every line total, and their sum, fits in a `Decimal`. Changes that
///   would overflow are rejected.
/// - Totals are always derived from `items`; nothing is cached.
///
/// Insertion order is preserved for display stability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from untrusted items, merging duplicate identities.
    ///
    /// Items that would overflow the cart total are dropped.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.add(item);
        }
        cart
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consume the cart and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Find the entry with the given identity.
    #[must_use]
    pub fn find(&self, key: &LineItemKey) -> Option<&LineItem> {
        self.items.iter().find(|item| item.matches(key))
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item, merging into an existing entry with the same identity.
    ///
    /// A matching entry has its quantity increased by `item.quantity`
    /// (saturating); otherwise the item is appended. The snapshot fields of
    /// an existing entry are kept as they were at its first add.
    ///
    /// Returns `false`, leaving the cart unchanged, when the resulting total
    /// price would not be representable.
    pub fn add(&mut self, item: LineItem) -> bool {
        let key = item.key();
        let position = self.items.iter().position(|entry| entry.matches(&key));
        let candidate = match position.and_then(|index| self.items.get(index)) {
            Some(existing) => LineItem {
                quantity: existing.quantity.saturating_add(item.quantity),
                ..existing.clone()
            },
            None => item,
        };

        if self.total_with(position, &candidate).is_none() {
            return false;
        }
        match position.and_then(|index| self.items.get_mut(index)) {
            Some(existing) => *existing = candidate,
            None => self.items.push(candidate),
        }
        true
    }

    /// Remove the entry with the given identity.
    ///
    /// Returns `false` when there was no such entry.
    pub fn remove(&mut self, key: &LineItemKey) -> bool {
        let before = self.items.len();
        self.items.retain(|item| !item.matches(key));
        self.items.len() != before
    }

    /// Set the quantity of the entry with the given identity.
    ///
    /// Requests below 1, and requests that would make the total price
    /// unrepresentable, are ignored rather than treated as a removal.
    /// Returns `true` only when an entry was updated.
    pub fn update_quantity(&mut self, key: &LineItemKey, requested: i64) -> bool {
        let Ok(quantity) = Quantity::try_from(requested) else {
            return false;
        };
        let Some((position, existing)) = self
            .items
            .iter()
            .enumerate()
            .find(|(_, item)| item.matches(key))
        else {
            return false;
        };

        let candidate = LineItem {
            quantity,
            ..existing.clone()
        };
        if self.total_with(Some(position), &candidate).is_none() {
            return false;
        }
        if let Some(slot) = self.items.get_mut(position) {
            *slot = candidate;
        }
        true
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities across all entries.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of `unit_price * quantity` across all entries.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Total price if the entry at `replaced` (or a new entry) were `line`.
    fn total_with(&self, replaced: Option<usize>, line: &LineItem) -> Option<Decimal> {
        self.items
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != replaced)
            .try_fold(line.checked_line_total()?, |total, (_, item)| {
                total.checked_add(item.checked_line_total()?)
            })
    }
}
