//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BLUETHREAD_CART_DIR` - Directory for client-local storage (default: .bluethread)
//! - `BLUETHREAD_CART_KEY` - Storage key holding the cart snapshot (default: cart)
//! - `BLUETHREAD_CURRENCY` - ISO 4217 currency for display and checkout (default: USD)
//! - `BLUETHREAD_SHIPPING_FLAT_RATE` - Flat shipping charge (default: 4.99)
//! - `BLUETHREAD_FREE_SHIPPING_THRESHOLD` - Subtotal at which shipping is free
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::str::FromStr;

use bluethread_core::CurrencyCode;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::DEFAULT_CART_KEY;
use crate::checkout::ShippingPolicy;

const DEFAULT_CART_DIR: &str = ".bluethread";
const DEFAULT_FLAT_RATE: &str = "4.99";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory backing client-local storage
    pub cart_dir: PathBuf,
    /// Storage key for the cart snapshot
    pub cart_key: String,
    /// Currency used for display and checkout
    pub currency: CurrencyCode,
    /// Shipping rules applied at checkout
    pub shipping: ShippingPolicy,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let cart_dir = get("BLUETHREAD_CART_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_CART_DIR), PathBuf::from);
        let cart_key = get("BLUETHREAD_CART_KEY").unwrap_or_else(|| DEFAULT_CART_KEY.to_string());
        validate_key(&cart_key, "BLUETHREAD_CART_KEY")?;

        let currency = parse_or_default("BLUETHREAD_CURRENCY", get("BLUETHREAD_CURRENCY"), "USD")?;
        let flat_rate: Decimal = parse_or_default(
            "BLUETHREAD_SHIPPING_FLAT_RATE",
            get("BLUETHREAD_SHIPPING_FLAT_RATE"),
            DEFAULT_FLAT_RATE,
        )?;
        non_negative(flat_rate, "BLUETHREAD_SHIPPING_FLAT_RATE")?;

        let free_shipping_threshold = get("BLUETHREAD_FREE_SHIPPING_THRESHOLD")
            .map(|raw| parse_value::<Decimal>("BLUETHREAD_FREE_SHIPPING_THRESHOLD", &raw))
            .transpose()?;
        if let Some(threshold) = free_shipping_threshold {
            non_negative(threshold, "BLUETHREAD_FREE_SHIPPING_THRESHOLD")?;
        }

        Ok(Self {
            cart_dir,
            cart_key,
            currency,
            shipping: ShippingPolicy {
                flat_rate,
                free_shipping_threshold,
            },
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            cart_dir: PathBuf::from(DEFAULT_CART_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
            currency: CurrencyCode::default(),
            shipping: ShippingPolicy::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a typed value, reporting the variable name on failure.
fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a variable if set, else parse the default.
fn parse_or_default<T>(key: &str, raw: Option<String>, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, raw.as_deref().unwrap_or(default))
}

fn non_negative(value: Decimal, key: &str) -> Result<(), ConfigError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must not be negative (got {value})"),
        ));
    }
    Ok(())
}

/// Storage keys become file names, so keep them to a safe alphabet.
fn validate_key(key: &str, var_name: &str) -> Result<(), ConfigError> {
    let valid = !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !valid {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("{key:?} may only contain letters, digits, '-', '_' and '.'"),
        ));
    }
    Ok(())
}
