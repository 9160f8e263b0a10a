//! Printify to local product conversions.

use std::collections::HashMap;

use bluethread_core::{Product, ProductId, ProductVariant, VariantId};
use rust_decimal::Decimal;

use super::types::{PrintifyImage, PrintifyOption, PrintifyProduct, PrintifyProductPage, PrintifyVariant};

/// Which local dimension an option value feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    Size,
    Color,
}

impl Dimension {
    /// Classify an option by its type, falling back to its display name.
    fn of(option: &PrintifyOption) -> Option<Self> {
        let classify = |s: &str| match s.to_ascii_lowercase().as_str() {
            "size" | "sizes" => Some(Self::Size),
            "color" | "colors" | "colour" | "colours" => Some(Self::Color),
            _ => None,
        };
        classify(option.kind.as_str()).or_else(|| classify(option.name.as_str()))
    }
}

/// Option value id -> (dimension, title).
type OptionIndex<'a> = HashMap<i64, (Dimension, &'a str)>;

fn index_options(options: &[PrintifyOption]) -> OptionIndex<'_> {
    options
        .iter()
        .filter_map(|option| Dimension::of(option).map(|dim| (dim, option)))
        .flat_map(|(dim, option)| {
            option
                .values
                .iter()
                .map(move |value| (value.id, (dim, value.title.as_str())))
        })
        .collect()
}

/// Convert Printify minor units to a decimal amount.
fn price_from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}

fn variant_image(images: &[PrintifyImage], variant_id: i64) -> Option<String> {
    images
        .iter()
        .find(|image| image.variant_ids.contains(&variant_id))
        .map(|image| image.src.clone())
}

fn convert_variant(
    variant: &PrintifyVariant,
    options: &OptionIndex<'_>,
    images: &[PrintifyImage],
) -> ProductVariant {
    let mut size = None;
    let mut color = None;
    for value_id in &variant.options {
        match options.get(value_id) {
            Some((Dimension::Size, title)) => size = Some((*title).to_owned()),
            Some((Dimension::Color, title)) => color = Some((*title).to_owned()),
            None => {}
        }
    }

    ProductVariant {
        id: VariantId::new(variant.id.to_string()),
        title: variant.title.clone(),
        size,
        color,
        price: price_from_minor_units(variant.price),
        available: variant.is_enabled && variant.is_available,
        image_url: variant_image(images, variant.id),
    }
}

/// Image URLs with the default image first, without duplicates.
fn ordered_images(images: &[PrintifyImage]) -> Vec<String> {
    let mut ordered: Vec<String> = Vec::with_capacity(images.len());
    let defaults = images.iter().filter(|image| image.is_default);
    let rest = images.iter().filter(|image| !image.is_default);
    for image in defaults.chain(rest) {
        if !ordered.contains(&image.src) {
            ordered.push(image.src.clone());
        }
    }
    ordered
}

/// Convert a Printify product into the local product model.
///
/// Disabled variants are dropped. Option values resolve to `size` or
/// `color` by option type; other dimensions are ignored.
pub fn convert_product(product: PrintifyProduct) -> Product {
    let options = index_options(&product.options);
    let variants = product
        .variants
        .iter()
        .filter(|variant| variant.is_enabled)
        .map(|variant| convert_variant(variant, &options, &product.images))
        .collect();

    Product {
        id: ProductId::new(product.id),
        title: product.title,
        description: product.description,
        images: ordered_images(&product.images),
        variants,
        tags: product.tags,
    }
}

/// Convert one page of the product list, skipping unpublished products.
pub fn convert_page(page: PrintifyProductPage) -> Vec<Product> {
    page.data
        .into_iter()
        .filter(|product| {
            if !product.visible {
                tracing::debug!(product_id = %product.id, "Skipping unpublished product");
            }
            product.visible
        })
        .map(convert_product)
        .collect()
}
