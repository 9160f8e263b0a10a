//! Unified error handling.
//!
//! Provides a unified `StorefrontError` for callers that drive the
//! storefront library (the CLI). Cart operations themselves never fail:
//! persistence errors are logged and swallowed inside the cart store.

use thiserror::Error;

use crate::cart::SnapshotError;
use crate::config::ConfigError;
use crate::printify::CatalogError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Client-local storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A cart snapshot could not be encoded or decoded.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Catalog JSON could not be read.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Reading or writing a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storefront_error_display() {
        let err = StorefrontError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = StorefrontError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_storefront_error_from_storage() {
        let err: StorefrontError = StorageError::InvalidKey("../x".to_string()).into();
        assert!(matches!(err, StorefrontError::Storage(_)));
        assert_eq!(err.to_string(), "Storage error: invalid storage key: \"../x\"");
    }
}
