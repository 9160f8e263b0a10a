//! Line item quantity.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is zero or negative.
    #[error("quantity must be at least 1 (got {0})")]
    BelowMinimum(i64),
    /// The value does not fit in a `u32`.
    #[error("quantity must be at most {max}", max = u32::MAX)]
    TooLarge,
}

/// A positive item count.
///
/// ## Constraints
///
/// - Always `>= 1`; there is no way to hold a zero quantity.
/// - Merging saturates at `u32::MAX` instead of wrapping.
///
/// ## Examples
///
/// ```
/// use bluethread_core::Quantity;
///
/// assert!(Quantity::new(0).is_none());
/// assert_eq!(Quantity::try_from(3_i64).unwrap().get(), 3);
/// assert!(Quantity::try_from(-5_i64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A quantity of one.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// The count as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Add two quantities, clamping at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0.get()))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 1 {
            return Err(QuantityError::BelowMinimum(value));
        }
        let value = u32::try_from(value).map_err(|_| QuantityError::TooLarge)?;
        Self::new(value).ok_or(QuantityError::BelowMinimum(0))
    }
}

impl TryFrom<u64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        let value = u32::try_from(value).map_err(|_| QuantityError::TooLarge)?;
        Self::new(value).ok_or(QuantityError::BelowMinimum(0))
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

impl From<NonZeroU32> for Quantity {
    fn from(value: NonZeroU32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_negative_rejected() {
        assert_eq!(Quantity::try_from(0_i64), Err(QuantityError::BelowMinimum(0)));
        assert_eq!(
            Quantity::try_from(-5_i64),
            Err(QuantityError::BelowMinimum(-5))
        );
        assert!(Quantity::try_from(0_u64).is_err());
    }

    #[test]
    fn test_too_large_rejected() {
        assert_eq!(
            Quantity::try_from(i64::from(u32::MAX) + 1),
            Err(QuantityError::TooLarge)
        );
    }

    #[test]
    fn test_saturating_add() {
        let a = Quantity::new(2).unwrap();
        let b = Quantity::new(3).unwrap();
        assert_eq!(a.saturating_add(b).get(), 5);

        let max = Quantity::new(u32::MAX).unwrap();
        assert_eq!(max.saturating_add(Quantity::ONE).get(), u32::MAX);
    }

    #[test]
    fn test_serde_number_form() {
        let q = Quantity::new(4).unwrap();
        assert_eq!(serde_json::to_string(&q).unwrap(), "4");
        assert_eq!(serde_json::from_str::<Quantity>("7").unwrap().get(), 7);
    }

    #[test]
    fn test_serde_rejects_invalid_numbers() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("-1").is_err());
        assert!(serde_json::from_str::<Quantity>("1.5").is_err());
        assert!(serde_json::from_str::<Quantity>("\"2\"").is_err());
    }
}
