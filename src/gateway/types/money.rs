//! Amount types for API boundary enforcement
//!
//! - `StrictAmount`: format-validated decimal input
//! - `normalize_amount`: rounding policy applied before any balance math

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fraction digits carried by every balance and transfer amount
pub const AMOUNT_SCALE: u32 = 2;

#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    #[error("Amount must be positive")]
    NotPositive,
}

/// Normalize an amount to 2 fraction digits using banker's rounding
/// (round-half-to-even). The normalized value is what moves between
/// balances and what lands in the ledger.
///
/// Rejects zero and negative amounts.
pub fn normalize_amount(raw: Decimal) -> Result<Decimal, AmountError> {
    if raw <= Decimal::ZERO {
        return Err(AmountError::NotPositive);
    }
    let rounded = raw.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointNearestEven);
    if rounded <= Decimal::ZERO {
        // e.g. 0.001 rounds to 0.00
        return Err(AmountError::NotPositive);
    }
    Ok(rounded)
}

// ============================================================================
// StrictAmount: Format-Validated Decimal at Serde Layer
// ============================================================================

/// Strict format decimal amount - validates format during deserialization
///
/// - Rejects `.5` (must be `0.5`)
/// - Rejects `5.` (must be `5.0` or `5`)
/// - Rejects negative values and scientific notation strings
/// - Accepts JSON numbers as well as strings
///
/// Business validation (positivity after rounding) happens later in
/// [`normalize_amount`].
#[derive(Debug, Clone, Copy)]
pub struct StrictAmount(Decimal);

impl StrictAmount {
    /// Get the inner Decimal value
    pub fn inner(self) -> Decimal {
        self.0
    }

    /// Create from Decimal (for testing)
    #[cfg(test)]
    pub fn from_decimal(d: Decimal) -> Self {
        Self(d)
    }
}

impl std::ops::Deref for StrictAmount {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for StrictAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        // Support both JSON number and JSON string
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum DecimalOrString {
            String(String),
            Number(Decimal),
        }

        let value = DecimalOrString::deserialize(deserializer)?;

        match value {
            DecimalOrString::String(s) => {
                if s.is_empty() {
                    return Err(D::Error::custom("Amount cannot be empty"));
                }
                if s.starts_with('.') {
                    return Err(D::Error::custom("Invalid format: use 0.5 not .5"));
                }
                if s.ends_with('.') {
                    return Err(D::Error::custom("Invalid format: use 5.0 not 5."));
                }
                if s.contains('e') || s.contains('E') {
                    return Err(D::Error::custom(
                        "Invalid format: scientific notation not allowed",
                    ));
                }
                if s.starts_with('+') {
                    return Err(D::Error::custom("Invalid format: + prefix not allowed"));
                }

                let d = Decimal::from_str(&s)
                    .map_err(|e| D::Error::custom(format!("Invalid decimal: {}", e)))?;

                if d.is_sign_negative() {
                    return Err(D::Error::custom("Amount cannot be negative"));
                }

                Ok(StrictAmount(d))
            }
            DecimalOrString::Number(d) => {
                if d.is_sign_negative() {
                    return Err(D::Error::custom("Amount cannot be negative"));
                }
                Ok(StrictAmount(d))
            }
        }
    }
}

impl Serialize for StrictAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize as string to preserve precision
        serializer.serialize_str(&self.0.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
