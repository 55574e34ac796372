//! Error types shared across the Forge workspace

use thiserror::Error;

/// Result type alias for Forge operations
pub type Result<T> = std::result::Result<T, ForgeError>;

/// Main error type for Forge
#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Organization not found: {0}")]
    OrganizationNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ForgeError::OrganizationNotFound("acme".to_string());
        assert_eq!(err.to_string(), "Organization not found: acme");

        let err = ForgeError::Config("FORGE_PORT is not a number".to_string());
        assert!(err.to_string().contains("FORGE_PORT"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ForgeError = io.into();
        assert!(matches!(err, ForgeError::Io(_)));
    }
}
