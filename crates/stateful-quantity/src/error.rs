//! Error types for quantity parsing.

use thiserror::Error;

/// Result type alias for quantity parsing.
pub type QuantityResult<T> = Result<T, QuantityError>;

/// Reasons a quantity string can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity is empty")]
    Empty,

    #[error("quantity '{raw}' is negative")]
    Negative { raw: String },

    #[error("quantity '{raw}' does not start with a number")]
    InvalidNumber { raw: String },

    #[error("quantity '{raw}' has unknown suffix '{suffix}'")]
    UnknownSuffix { raw: String, suffix: String },

    #[error("quantity '{raw}' is out of range")]
    OutOfRange { raw: String },
}
