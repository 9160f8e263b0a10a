//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.
//!
//! Product and variant ids are opaque strings owned by the catalog provider.
//! Values arriving from persisted storage or from the catalog JSON are not
//! always strings (Printify variant ids are integers), so deserialization
//! accepts either form and normalizes to the decimal string.

use core::fmt;

use serde::de::{self, Visitor};

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize` as a plain JSON string
/// - `Deserialize` from a JSON string or integer
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use bluethread_core::define_id;
/// define_id!(ShopId);
/// define_id!(BlueprintId);
///
/// let shop_id = ShopId::new("1");
/// let blueprint_id = BlueprintId::new("1");
///
/// // These are different types, so this won't compile:
/// // let _: ShopId = blueprint_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                deserializer
                    .deserialize_any($crate::types::id::IdVisitor)
                    .map(Self)
            }
        }
    };
}

define_id!(ProductId);
define_id!(VariantId);

/// Visitor accepting a string or an integer as an opaque id.
#[doc(hidden)]
#[derive(Debug, Clone, Copy)]
pub struct IdVisitor;

impl Visitor<'_> for IdVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer id")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(value.to_owned())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("5d39b159e7c48c000728c89f");
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"5d39b159e7c48c000728c89f\""
        );
    }

    #[test]
    fn test_id_deserializes_from_integer() {
        let id: VariantId = serde_json::from_str("8253").unwrap();
        assert_eq!(id.as_str(), "8253");

        let id: VariantId = serde_json::from_str("-4").unwrap();
        assert_eq!(id.as_str(), "-4");
    }

    #[test]
    fn test_id_rejects_other_json_types() {
        assert!(serde_json::from_str::<ProductId>("true").is_err());
        assert!(serde_json::from_str::<ProductId>("null").is_err());
        assert!(serde_json::from_str::<ProductId>("[1]").is_err());
    }

    #[test]
    fn test_id_display_and_conversions() {
        let id = ProductId::from("tee-1");
        assert_eq!(id.to_string(), "tee-1");
        assert_eq!(id.as_ref(), "tee-1");
        assert_eq!(id.into_inner(), "tee-1".to_string());
    }
}
