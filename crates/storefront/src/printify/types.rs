//! Raw Printify catalog types.
//!
//! These mirror the JSON returned by Printify's product endpoints closely
//! enough to deserialize it; everything the storefront does not use is
//! ignored. See [`super::conversions`] for the mapping to local types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Product Types
// =============================================================================

/// A Printify product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintifyProduct {
    /// Printify product id (24 hex characters).
    pub id: String,
    /// Product title.
    pub title: String,
    /// Product description (HTML).
    #[serde(default)]
    pub description: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Option dimensions (colors, sizes, ...).
    #[serde(default)]
    pub options: Vec<PrintifyOption>,
    /// Every variant of the blueprint, including disabled ones.
    #[serde(default)]
    pub variants: Vec<PrintifyVariant>,
    /// Mockup images.
    #[serde(default)]
    pub images: Vec<PrintifyImage>,
    /// Whether the product is published to the storefront.
    #[serde(default = "default_true")]
    pub visible: bool,
}

/// An option dimension such as "Colors" or "Sizes".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintifyOption {
    /// Display name (e.g., "Sizes").
    pub name: String,
    /// Option type (e.g., "size", "color").
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Possible values.
    #[serde(default)]
    pub values: Vec<PrintifyOptionValue>,
}

/// One value of an option dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintifyOptionValue {
    /// Value id referenced from [`PrintifyVariant::options`].
    pub id: i64,
    /// Display title (e.g., "Black", "XL").
    pub title: String,
}

// =============================================================================
// Variant Types
// =============================================================================

/// A Printify variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintifyVariant {
    /// Variant id.
    pub id: i64,
    /// Stock keeping unit.
    #[serde(default)]
    pub sku: Option<String>,
    /// Retail price in minor units (cents).
    pub price: i64,
    /// Display title, e.g. "Black / M".
    #[serde(default)]
    pub title: String,
    /// Whether the merchant enabled this variant.
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    /// Whether the print provider can currently fulfil it.
    #[serde(default = "default_true")]
    pub is_available: bool,
    /// Option value ids, one per option dimension.
    #[serde(default)]
    pub options: Vec<i64>,
}

// =============================================================================
// Image Types
// =============================================================================

/// A mockup image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintifyImage {
    /// Image URL.
    pub src: String,
    /// Variants shown in this image.
    #[serde(default)]
    pub variant_ids: Vec<i64>,
    /// Camera position (e.g., "front").
    #[serde(default)]
    pub position: Option<String>,
    /// Whether this is the product's primary image.
    #[serde(default)]
    pub is_default: bool,
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of the product list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintifyProductPage {
    /// Current page number (1-based).
    #[serde(default = "default_page")]
    pub current_page: u32,
    /// Last available page number.
    #[serde(default = "default_page")]
    pub last_page: u32,
    /// Products on this page.
    pub data: Vec<PrintifyProduct>,
}

impl PrintifyProductPage {
    /// Whether more pages follow this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.current_page < self.last_page
    }
}

const fn default_true() -> bool {
    true
}

const fn default_page() -> u32 {
    1
}
