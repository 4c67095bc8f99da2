//! Monetary amount as reported by the bank API.
//!
//! Values arrive as decimal strings (`"-12.50"`) and are kept in
//! `rust_decimal` so their scale survives untouched into every output format.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A decimal value paired with its currency unit code.
///
/// The value keeps its native precision: `"12.5"` renders as `12.5`,
/// `"12.50"` as `12.50`.
///
/// # Examples
///
/// ```
/// use transaction_history::Amount;
///
/// let amount = Amount::new("-12.50".parse().unwrap(), "EUR");
/// assert_eq!(amount.to_string(), "-12.50");
/// assert_eq!(amount.unit, "EUR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// Decimal value, serialized as a string.
    #[serde(with = "rust_decimal::serde::str")]
    pub value: Decimal,

    /// Three-letter currency code.
    pub unit: String,
}

impl Amount {
    /// Creates an amount from a value and a unit code.
    pub fn new(value: Decimal, unit: &str) -> Self {
        Amount {
            value,
            unit: unit.to_string(),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
