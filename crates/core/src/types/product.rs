//! The storefront's local product model.
//!
//! Catalog providers (Printify today) are mapped into these types by the
//! storefront crate. Product display surfaces build cart line items from
//! them via [`Product::line_item`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariantId};
use super::line_item::LineItem;
use super::quantity::Quantity;

/// A sellable product with its purchasable variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog product id.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Description (may contain HTML from the catalog).
    pub description: String,
    /// Image URLs, default image first.
    pub images: Vec<String>,
    /// Purchasable variants.
    pub variants: Vec<ProductVariant>,
    /// Catalog tags.
    pub tags: Vec<String>,
}

/// One size/color combination of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Catalog variant id.
    pub id: VariantId,
    /// Catalog title, e.g. `"Black / M"`.
    pub title: String,
    /// Size option value.
    pub size: Option<String>,
    /// Color option value.
    pub color: Option<String>,
    /// Retail price per unit.
    pub price: Decimal,
    /// Whether the variant can currently be ordered.
    pub available: bool,
    /// Variant-specific image, if the catalog has one.
    pub image_url: Option<String>,
}

impl Product {
    /// The first image, used as the product thumbnail.
    #[must_use]
    pub fn default_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Find the variant with exactly the given size and color.
    #[must_use]
    pub fn find_variant(&self, size: Option<&str>, color: Option<&str>) -> Option<&ProductVariant> {
        self.variants
            .iter()
            .find(|v| v.size.as_deref() == size && v.color.as_deref() == color)
    }

    /// Lowest and highest price over available variants.
    #[must_use]
    pub fn price_range(&self) -> Option<(Decimal, Decimal)> {
        let mut prices = self.variants.iter().filter(|v| v.available).map(|v| v.price);
        let first = prices.next()?;
        Some(prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Distinct sizes in first-seen order.
    #[must_use]
    pub fn sizes(&self) -> Vec<&str> {
        distinct(self.variants.iter().filter_map(|v| v.size.as_deref()))
    }

    /// Distinct colors in first-seen order.
    #[must_use]
    pub fn colors(&self) -> Vec<&str> {
        distinct(self.variants.iter().filter_map(|v| v.color.as_deref()))
    }

    /// Build a cart line item for `variant`, snapshotting display data.
    ///
    /// The variant image is preferred; the product's default image is the
    /// fallback.
    #[must_use]
    pub fn line_item(&self, variant: &ProductVariant, quantity: Quantity) -> LineItem {
        let image_url = variant
            .image_url
            .as_deref()
            .or_else(|| self.default_image())
            .unwrap_or_default();

        LineItem {
            product_id: self.id.clone(),
            name: self.title.clone(),
            unit_price: variant.price,
            image_url: image_url.to_owned(),
            quantity,
            size: variant.size.clone(),
            color: variant.color.clone(),
            variant_id: Some(variant.id.clone()),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
