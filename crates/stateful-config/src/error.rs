//! Error types for configuration resolution.

use stateful_quantity::QuantityError;
use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while resolving a configuration or translating
/// its resource section.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The overlay document is not valid YAML or does not fit the schema.
    #[error("invalid configuration document: {0}")]
    Document(#[from] serde_yaml::Error),

    /// A resource field could not be parsed as a quantity.
    #[error("error parsing {field} '{raw}': {source}")]
    Quantity {
        field: &'static str,
        raw: String,
        #[source]
        source: QuantityError,
    },
}

impl ConfigError {
    /// The document field a quantity error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::Quantity { field, .. } => Some(*field),
            ConfigError::Document(_) => None,
        }
    }
}
