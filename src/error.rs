//! Error types for the billing engine.

use thiserror::Error;

/// Result type alias for shop operations.
pub type Result<T> = std::result::Result<T, ShopError>;

/// Errors raised by engine operations.
///
/// Everything propagates synchronously to the caller; the engine never
/// substitutes a default numeric result to mask a failure. An engine type
/// label that matches no known class is not an error at all: it resolves
/// through the rate fallback chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShopError {
    /// A referenced record does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    /// A caller-supplied value is out of range or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ShopError {
    pub fn not_found(entity: &'static str, id: u32) -> Self {
        ShopError::NotFound { entity, id }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ShopError::InvalidArgument(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_the_record() {
        let err = ShopError::not_found("customer", 42);
        assert_eq!(err.to_string(), "customer 42 not found");
    }

    #[test]
    fn invalid_argument_carries_message() {
        let err = ShopError::invalid("hours must be positive");
        assert_eq!(err.to_string(), "invalid argument: hours must be positive");
    }
}
