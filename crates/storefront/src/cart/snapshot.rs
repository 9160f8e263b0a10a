//! Cart snapshot encoding.
//!
//! The snapshot is a JSON array of line items. This is the one boundary
//! where data arrives untyped (a raw string from storage), so decoding
//! validates shape here and nowhere else.

use bluethread_core::LineItem;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The stored value is not valid JSON, or encoding failed.
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The stored value is valid JSON but not an array.
    #[error("snapshot is not an array (found {0})")]
    NotAnArray(&'static str),
}

/// Serialize line items to the persisted form.
///
/// # Errors
///
/// Returns `SnapshotError::Json` if serialization fails.
pub fn encode(items: &[LineItem]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(items)?)
}

/// Parse a persisted snapshot.
///
/// Elements that are not line-item shaped, or whose line total is not
/// representable, are skipped with a warning; the rest are returned in
/// stored order.
///
/// # Errors
///
/// Returns `SnapshotError` if `raw` is not JSON or is not a JSON array.
pub fn decode(raw: &str) -> Result<Vec<LineItem>, SnapshotError> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Array(elements) = value else {
        return Err(SnapshotError::NotAnArray(json_kind(&value)));
    };

    let mut items = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<LineItem>(element) {
            Ok(item) if item.checked_line_total().is_none() => {
                tracing::warn!(
                    index,
                    product_id = %item.product_id,
                    "Skipping cart line item with overflowing total"
                );
            }
            Ok(item) => items.push(item),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed cart line item");
            }
        }
    }
    Ok(items)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
