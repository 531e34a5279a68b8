//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Lookups, deletes and clears never fail; misses are reported through
/// `Option`/`bool` return values.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Construction options were rejected
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Key ordering could not be rendered for inspection
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_message() {
        let err = CacheError::Configuration("capacity must be >= 3, got 2".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: capacity must be >= 3, got 2"
        );
    }

    #[test]
    fn test_serialization_error_from() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: CacheError = json_err.into();
        assert!(matches!(err, CacheError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
