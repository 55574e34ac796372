//! Remove member command
//!
//! Removes a user from an organization. Owner-only: the requester must hold
//! an owner membership. The persistence layer refuses to orphan an
//! organization, and that refusal is surfaced as an internal error rather
//! than an authorization failure.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::memberships::{self, RemoveMembershipError};
use crate::db::{organizations, users};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveMemberCommand {
    /// Organization name from the request path
    pub org: String,

    /// Target username from the request path
    pub username: String,

    /// The authenticated caller
    pub requester_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveMemberResponse {
    pub org: String,
    pub username: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RemoveMemberError {
    #[error("Organization '{0}' not found")]
    OrganizationNotFound(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("You must be an owner of the organization")]
    NotOwner,

    #[error("Failed to remove member: {0}")]
    Removal(#[from] RemoveMembershipError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<RemoveMemberResponse, RemoveMemberError>> for RemoveMemberCommand {}

impl crate::cqrs::middleware::Command for RemoveMemberCommand {}

#[tracing::instrument(skip(pool), fields(org = %command.org, username = %command.username))]
pub async fn handle(
    pool: PgPool,
    command: RemoveMemberCommand,
) -> Result<RemoveMemberResponse, RemoveMemberError> {
    let org = organizations::get_by_name(&pool, &command.org)
        .await?
        .ok_or_else(|| RemoveMemberError::OrganizationNotFound(command.org.clone()))?;

    if !memberships::is_owner(&pool, org.id, command.requester_id).await? {
        return Err(RemoveMemberError::NotOwner);
    }

    let target = users::get_by_username(&pool, &command.username)
        .await?
        .ok_or_else(|| RemoveMemberError::UserNotFound(command.username.clone()))?;

    memberships::remove(&pool, org.id, target.id).await?;

    tracing::info!(
        org_id = %org.id,
        user_id = %target.id,
        "Member removed from organization"
    );

    Ok(RemoveMemberResponse {
        org: org.name,
        username: target.username,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_owner_message() {
        assert_eq!(
            RemoveMemberError::NotOwner.to_string(),
            "You must be an owner of the organization"
        );
    }

    #[test]
    fn test_last_owner_is_surfaced() {
        let err = RemoveMemberError::Removal(RemoveMembershipError::LastOwner);
        assert!(err.to_string().contains("last owner"));
    }
}
