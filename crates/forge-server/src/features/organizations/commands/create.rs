//! Create organization command
//!
//! The command validates its fields, inserts the organization, and seeds the
//! creator's owner membership in the same transaction.

use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::organizations::{self, CreateOrganizationDbError, NewOrganization};
use crate::features::shared::validation::{
    validate_display_name, validate_org_name, validate_url, DisplayNameValidationError,
    OrgNameValidationError, UrlValidationError,
};

/// Command to create a new organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganizationCommand {
    /// URL-safe account name (must be unique)
    pub name: String,

    /// Optional display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional website URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Optional location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// The creating user; becomes the organization's first owner.
    /// Populated from the requester context, never from the request body.
    #[serde(skip)]
    pub creator_id: Uuid,
}

/// Response from creating an organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganizationResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Errors that can occur when creating an organization
#[derive(Debug, thiserror::Error)]
pub enum CreateOrganizationError {
    #[error("Name validation failed: {0}")]
    NameValidation(#[from] OrgNameValidationError),

    #[error("Display name validation failed: {0}")]
    DisplayNameValidation(#[from] DisplayNameValidationError),

    #[error("URL validation failed: {0}")]
    UrlValidation(#[from] UrlValidationError),

    #[error("Organization '{0}' already exists")]
    DuplicateName(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<CreateOrganizationResponse, CreateOrganizationError>>
    for CreateOrganizationCommand
{
}

impl crate::cqrs::middleware::Command for CreateOrganizationCommand {}

impl CreateOrganizationCommand {
    /// Validates the command parameters
    #[tracing::instrument(skip(self), fields(name = %self.name))]
    pub fn validate(&self) -> Result<(), CreateOrganizationError> {
        validate_org_name(&self.name)?;
        validate_display_name(self.full_name.as_deref())?;

        if let Some(ref website) = self.website {
            validate_url(website, "website")?;
        }

        Ok(())
    }
}

/// Handler function for creating organizations
#[tracing::instrument(skip(pool, command), fields(name = %command.name, creator = %command.creator_id))]
pub async fn handle(
    pool: PgPool,
    command: CreateOrganizationCommand,
) -> Result<CreateOrganizationResponse, CreateOrganizationError> {
    command.validate()?;

    let org = organizations::create_with_owner(
        &pool,
        NewOrganization {
            name: command.name,
            full_name: command.full_name,
            description: command.description,
            website: command.website,
            location: command.location,
        },
        command.creator_id,
    )
    .await
    .map_err(|e| match e {
        CreateOrganizationDbError::DuplicateName(name) => {
            CreateOrganizationError::DuplicateName(name)
        },
        CreateOrganizationDbError::Sqlx(e) => CreateOrganizationError::Database(e),
    })?;

    tracing::info!(
        org_id = %org.id,
        org_name = %org.name,
        "Organization created"
    );

    Ok(CreateOrganizationResponse {
        id: org.id,
        name: org.name,
        full_name: org.full_name,
        description: org.description,
        website: org.website,
        location: org.location,
        created_at: org.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: &str) -> CreateOrganizationCommand {
        CreateOrganizationCommand {
            name: name.to_string(),
            full_name: None,
            description: None,
            website: None,
            location: None,
            creator_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_validation_success() {
        let mut cmd = command("acme-corp");
        cmd.full_name = Some("ACME Corporation".to_string());
        cmd.website = Some("https://acme.example".to_string());
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_name() {
        assert!(matches!(
            command("").validate(),
            Err(CreateOrganizationError::NameValidation(_))
        ));
    }

    #[test]
    fn test_validation_invalid_name_format() {
        for name in ["has spaces", "has@special", "-leading"] {
            assert!(
                matches!(
                    command(name).validate(),
                    Err(CreateOrganizationError::NameValidation(_))
                ),
                "'{}' should be invalid",
                name
            );
        }
    }

    #[test]
    fn test_validation_blank_display_name() {
        let mut cmd = command("acme");
        cmd.full_name = Some("   ".to_string());
        assert!(matches!(
            cmd.validate(),
            Err(CreateOrganizationError::DisplayNameValidation(_))
        ));
    }

    #[test]
    fn test_validation_invalid_website() {
        let mut cmd = command("acme");
        cmd.website = Some("not-a-url".to_string());
        assert!(matches!(
            cmd.validate(),
            Err(CreateOrganizationError::UrlValidation(_))
        ));
    }

    #[test]
    fn test_creator_id_not_deserialized_from_body() {
        let cmd: CreateOrganizationCommand =
            serde_json::from_str(r#"{"name": "acme"}"#).unwrap();
        assert_eq!(cmd.creator_id, Uuid::nil());
    }
}
