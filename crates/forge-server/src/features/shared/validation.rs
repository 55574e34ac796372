//! Shared validation utilities
//!
//! Validation for organization fields. Organization names share the
//! platform's account-name rules so they stay routable as path segments.

use thiserror::Error;

/// Maximum length for organization and user names.
pub const MAX_NAME_LENGTH: usize = 40;

/// Maximum length for display names.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Errors that can occur during organization-name validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrgNameValidationError {
    #[error("Name is required and cannot be empty")]
    Required,

    #[error("Name must be between 1 and {max_length} characters")]
    TooLong { max_length: usize },

    #[error("Name can only contain letters, numbers, hyphens, underscores, and dots")]
    InvalidFormat,

    #[error("Name must start and end with a letter or number")]
    InvalidEdge,
}

/// Errors that can occur during display-name validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisplayNameValidationError {
    #[error("Display name cannot be blank")]
    Blank,

    #[error("Display name must be at most {max_length} characters")]
    TooLong { max_length: usize },
}

/// Errors that can occur during URL validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("{field_name} URL is invalid: must start with http:// or https://")]
    InvalidFormat { field_name: String },
}

/// Validate an organization name (account-name rules).
///
/// # Rules
/// - Must not be empty
/// - Must not exceed [`MAX_NAME_LENGTH`] characters
/// - Must contain only letters, numbers, hyphens, underscores, and dots
/// - Must start and end with a letter or number
pub fn validate_org_name(name: &str) -> Result<(), OrgNameValidationError> {
    if name.is_empty() {
        return Err(OrgNameValidationError::Required);
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(OrgNameValidationError::TooLong {
            max_length: MAX_NAME_LENGTH,
        });
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(OrgNameValidationError::InvalidFormat);
    }

    let edges_ok = name.starts_with(|c: char| c.is_ascii_alphanumeric())
        && name.ends_with(|c: char| c.is_ascii_alphanumeric());
    if !edges_ok {
        return Err(OrgNameValidationError::InvalidEdge);
    }

    Ok(())
}

/// Validate an optional display name.
///
/// `None` is valid; `Some` must be non-blank after trimming and within
/// [`MAX_DISPLAY_NAME_LENGTH`] characters.
pub fn validate_display_name(name: Option<&str>) -> Result<(), DisplayNameValidationError> {
    let Some(name) = name else {
        return Ok(());
    };

    if name.trim().is_empty() {
        return Err(DisplayNameValidationError::Blank);
    }

    if name.len() > MAX_DISPLAY_NAME_LENGTH {
        return Err(DisplayNameValidationError::TooLong {
            max_length: MAX_DISPLAY_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validate a URL field.
///
/// Empty strings are considered valid (use Option<String> and check for Some).
pub fn validate_url(url: &str, field_name: &str) -> Result<(), UrlValidationError> {
    if url.is_empty() {
        return Ok(());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(UrlValidationError::InvalidFormat {
            field_name: field_name.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_org_name_valid() {
        for name in ["acme", "acme-corp", "Acme_Corp", "a.b.c", "a", "team2024"] {
            assert!(validate_org_name(name).is_ok(), "'{}' should be valid", name);
        }
    }

    #[test]
    fn test_validate_org_name_empty() {
        assert_eq!(validate_org_name(""), Err(OrgNameValidationError::Required));
    }

    #[test]
    fn test_validate_org_name_too_long() {
        let long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            validate_org_name(&long),
            Err(OrgNameValidationError::TooLong {
                max_length: MAX_NAME_LENGTH
            })
        );
    }

    #[test]
    fn test_validate_org_name_invalid_chars() {
        for name in ["has spaces", "has@special", "emoji🦀"] {
            assert_eq!(
                validate_org_name(name),
                Err(OrgNameValidationError::InvalidFormat),
                "'{}' should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_validate_org_name_edges() {
        for name in ["-leading", "trailing-", ".dotted", "under_"] {
            assert_eq!(
                validate_org_name(name),
                Err(OrgNameValidationError::InvalidEdge),
                "'{}' should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_validate_display_name() {
        assert!(validate_display_name(None).is_ok());
        assert!(validate_display_name(Some("ACME Corporation")).is_ok());
        assert_eq!(
            validate_display_name(Some("   ")),
            Err(DisplayNameValidationError::Blank)
        );
        let long = "a".repeat(MAX_DISPLAY_NAME_LENGTH + 1);
        assert!(matches!(
            validate_display_name(Some(&long)),
            Err(DisplayNameValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com", "website").is_ok());
        assert!(validate_url("http://example.com/a?b=1", "website").is_ok());
        assert!(validate_url("", "website").is_ok());
        assert!(validate_url("ftp://example.com", "website").is_err());
        assert!(validate_url("example.com", "website").is_err());
    }
}
