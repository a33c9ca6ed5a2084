//! Error types for depot.

use thiserror::Error;

use crate::upload::CatalogError;

/// Common error type for depot.
#[derive(Error, Debug)]
pub enum DepotError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for configuration or caller input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Message catalog error.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for depot operations.
pub type Result<T> = std::result::Result<T, DepotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = DepotError::Validation("port out of range".to_string());
        assert_eq!(err.to_string(), "validation error: port out of range");
    }

    #[test]
    fn test_config_error_display() {
        let err = DepotError::Config("unknown timezone".to_string());
        assert_eq!(err.to_string(), "configuration error: unknown timezone");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DepotError = io_err.into();
        assert!(matches!(err, DepotError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(DepotError::Validation("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
