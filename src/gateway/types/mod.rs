//! Gateway types module
//!
//! Type-safe types for the API boundary:
//!
//! - [`StrictAmount`]: format-validated decimal amount for API input
//! - [`ApiResponse<T>`]: unified response wrapper
//! - [`ApiError`]: HTTP status + error code pair, renders as `ApiResponse`
//!
//! ## Submodules
//! - [`money`]: amount input validation and normalization
//! - [`response`]: response envelope and error codes

pub mod money;
pub mod response;

// Re-export commonly used types at module root
pub use money::{AmountError, StrictAmount, normalize_amount};
pub use response::{ApiError, ApiResponse, error_codes};
