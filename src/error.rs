//! Error types for the cache crate
//!
//! Cache operations themselves never fail; these errors cover the
//! configuration layer around them.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Eviction policy name is not recognised
    #[error("Unknown eviction policy: {0}")]
    UnknownPolicy(String),

    /// Configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache crate.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CacheError::UnknownPolicy("arc".to_string());
        assert_eq!(err.to_string(), "Unknown eviction policy: arc");

        let err = CacheError::InvalidConfig("CACHE_CAPACITY=abc".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: CACHE_CAPACITY=abc");
    }
}
