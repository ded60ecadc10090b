//! Input validation for wallet ids and transaction PINs
//!
//! Validated types with private fields; construction only goes through the
//! public `new()` so a held value is always well-formed.

use std::fmt;

// ============================================================================
// Validation Errors
// ============================================================================

/// Validation errors for wallet ids and PINs
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid wallet id '{got}': expected format {expected}")]
    WalletIdFormat { got: String, expected: &'static str },

    #[error("Invalid length for {field}: expected {expected}, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("PIN must be exactly 4 digits")]
    PinFormat,
}

// ============================================================================
// WalletId - Validated Wallet Identifier (Private Field)
// ============================================================================

const WALLET_ID_PREFIX: &str = "WLT-";
const WALLET_ID_SUFFIX_LEN: usize = 10;

/// Validated wallet id (guaranteed `WLT-` + 10 uppercase alphanumerics)
///
/// # Examples
/// ```
/// use custodia::account::validation::WalletId;
///
/// let id = WalletId::new("WLT-AB12CD34EF").unwrap();
/// assert_eq!(id.as_str(), "WLT-AB12CD34EF");
///
/// assert!(WalletId::new("wlt-ab12cd34ef").is_err()); // lowercase rejected
/// assert!(WalletId::new("WLT-SHORT").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletId(String);

impl WalletId {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();

        if raw.len() != WALLET_ID_PREFIX.len() + WALLET_ID_SUFFIX_LEN {
            return Err(ValidationError::InvalidLength {
                field: "wallet_id",
                expected: WALLET_ID_PREFIX.len() + WALLET_ID_SUFFIX_LEN,
                actual: raw.len(),
            });
        }

        let suffix = match raw.strip_prefix(WALLET_ID_PREFIX) {
            Some(s) => s,
            None => {
                return Err(ValidationError::WalletIdFormat {
                    got: raw.to_string(),
                    expected: "WLT-XXXXXXXXXX",
                });
            }
        };

        if !suffix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(ValidationError::WalletIdFormat {
                got: raw.to_string(),
                expected: "WLT- followed by 10 uppercase letters or digits",
            });
        }

        Ok(Self(raw.to_string()))
    }

    /// Generate a fresh wallet id for a new account
    pub fn generate() -> Self {
        use rand::Rng;

        let suffix: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .map(|b| (b as char).to_ascii_uppercase())
            .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            .take(WALLET_ID_SUFFIX_LEN)
            .collect();

        Self(format!("{}{}", WALLET_ID_PREFIX, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for WalletId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Pin - Validated 4-Digit Transaction PIN (Private Field)
// ============================================================================

/// Validated transaction PIN (exactly 4 ASCII digits)
///
/// Holds the cleartext only long enough to hash or verify it; never
/// serialized or logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        if raw.len() != 4 || !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::PinFormat);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Debug must not leak the secret
impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pin(****)")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_id_valid() {
        assert!(WalletId::new("WLT-AB12CD34EF").is_ok());
        assert!(WalletId::new("WLT-0000000000").is_ok());
        assert!(WalletId::new("  WLT-ZZZZZZZZZZ  ").is_ok()); // trimmed
    }

    #[test]
    fn test_wallet_id_bad_prefix() {
        let err = WalletId::new("WAL-AB12CD34EF").unwrap_err();
        assert!(matches!(err, ValidationError::WalletIdFormat { .. }));
    }

    #[test]
    fn test_wallet_id_lowercase_rejected() {
        let err = WalletId::new("WLT-ab12cd34ef").unwrap_err();
        assert!(matches!(err, ValidationError::WalletIdFormat { .. }));
    }

    #[test]
    fn test_wallet_id_invalid_length() {
        let err = WalletId::new("WLT-SHORT").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidLength { .. }));

        let err = WalletId::new("").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidLength { .. }));
    }

    #[test]
    fn test_wallet_id_generate_roundtrip() {
        for _ in 0..32 {
            let id = WalletId::generate();
            assert!(WalletId::new(id.as_str()).is_ok(), "generated {}", id);
        }
    }

    #[test]
    fn test_pin_valid() {
        assert!(Pin::new("0000").is_ok());
        assert!(Pin::new("4931").is_ok());
    }

    #[test]
    fn test_pin_invalid() {
        assert_eq!(Pin::new("123").unwrap_err(), ValidationError::PinFormat);
        assert_eq!(Pin::new("12345").unwrap_err(), ValidationError::PinFormat);
        assert_eq!(Pin::new("12a4").unwrap_err(), ValidationError::PinFormat);
        assert_eq!(Pin::new("").unwrap_err(), ValidationError::PinFormat);
    }

    #[test]
    fn test_pin_debug_redacted() {
        let pin = Pin::new("1234").unwrap();
        assert_eq!(format!("{:?}", pin), "Pin(****)");
    }
}
