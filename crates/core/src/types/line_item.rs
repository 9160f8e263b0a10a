//! Cart line items and their identity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariantId};
use super::quantity::Quantity;

/// A single product selection held in the cart.
///
/// `name`, `unit_price` and `image_url` are snapshots taken when the item is
/// added and are never refreshed from the catalog afterwards.
///
/// The persisted JSON form uses camelCase keys. Absent `size`, `color` and
/// `variant_id` are omitted on write; on read, `null` and a missing key both
/// mean absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Identifier of the underlying product.
    pub product_id: ProductId,
    /// Display name.
    pub name: String,
    /// Price of a single unit.
    pub unit_price: Decimal,
    /// Display thumbnail.
    #[serde(default)]
    pub image_url: String,
    /// Number of units.
    pub quantity: Quantity,
    /// Selected size, if the product varies by size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Selected color, if the product varies by color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Source-system variant record. Informational only; not part of identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
}

impl LineItem {
    /// Create a line item without size, color or variant.
    #[must_use]
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: Quantity,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            image_url: String::new(),
            quantity,
            size: None,
            color: None,
            variant_id: None,
        }
    }

    /// Set the thumbnail URL.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Set the size.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the source variant reference.
    #[must_use]
    pub fn with_variant_id(mut self, variant_id: impl Into<VariantId>) -> Self {
        self.variant_id = Some(variant_id.into());
        self
    }

    /// The identity tuple of this item.
    #[must_use]
    pub fn key(&self) -> LineItemKey {
        LineItemKey {
            product_id: self.product_id.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    /// Whether this item has the given identity.
    #[must_use]
    pub fn matches(&self, key: &LineItemKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }

    /// `unit_price * quantity`, or `None` if the product is not representable.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity.get()))
    }

    /// `unit_price * quantity`.
    ///
    /// Saturates at the `Decimal` bounds. Items held by a
    /// [`Cart`](super::cart::Cart) never reach them.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price
            .saturating_mul(Decimal::from(self.quantity.get()))
    }

    /// Human-readable variant description, e.g. `"M / Black"`.
    ///
    /// Returns `None` when neither size nor color is set.
    #[must_use]
    pub fn variant_label(&self) -> Option<String> {
        let parts: Vec<&str> = [self.size.as_deref(), self.color.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" / "))
        }
    }
}

/// Identity of a cart entry: `(product_id, size, color)`.
///
/// An absent size or color is distinct from every string, including `""`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineItemKey {
    /// Product identifier.
    pub product_id: ProductId,
    /// Selected size.
    pub size: Option<String>,
    /// Selected color.
    pub color: Option<String>,
}

impl LineItemKey {
    /// Key for a product with no size or color.
    #[must_use]
    pub fn new(product_id: impl Into<ProductId>) -> Self {
        Self {
            product_id: product_id.into(),
            size: None,
            color: None,
        }
    }

    /// Set the size component.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the color component.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Build a key from optional parts, as received from a form or CLI.
    #[must_use]
    pub fn from_parts(
        product_id: impl Into<ProductId>,
        size: Option<String>,
        color: Option<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            size,
            color,
        }
    }
}
