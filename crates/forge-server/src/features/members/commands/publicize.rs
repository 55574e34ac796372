//! Publicize membership command
//!
//! Flags a membership as visible to non-members. Only the member themself
//! may change their visibility, and only for an organization they actually
//! belong to.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{memberships, organizations, users};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicizeMembershipCommand {
    /// Organization name from the request path
    pub org: String,

    /// Target username from the request path
    pub username: String,

    /// The authenticated caller
    pub requester_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicizeMembershipResponse {
    pub org: String,
    pub username: String,
    pub is_public: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum PublicizeMembershipError {
    #[error("Organization '{0}' not found")]
    OrganizationNotFound(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Cannot publicize another member")]
    NotSelf,

    #[error("Must be a member of the organization")]
    NotMember,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<PublicizeMembershipResponse, PublicizeMembershipError>>
    for PublicizeMembershipCommand
{
}

impl crate::cqrs::middleware::Command for PublicizeMembershipCommand {}

#[tracing::instrument(skip(pool), fields(org = %command.org, username = %command.username))]
pub async fn handle(
    pool: PgPool,
    command: PublicizeMembershipCommand,
) -> Result<PublicizeMembershipResponse, PublicizeMembershipError> {
    let org = organizations::get_by_name(&pool, &command.org)
        .await?
        .ok_or_else(|| PublicizeMembershipError::OrganizationNotFound(command.org.clone()))?;

    let target = users::get_by_username(&pool, &command.username)
        .await?
        .ok_or_else(|| PublicizeMembershipError::UserNotFound(command.username.clone()))?;

    if target.id != command.requester_id {
        return Err(PublicizeMembershipError::NotSelf);
    }

    let updated = memberships::set_visibility(&pool, org.id, target.id, true).await?;
    if updated == 0 {
        return Err(PublicizeMembershipError::NotMember);
    }

    tracing::info!(
        org_id = %org.id,
        user_id = %target.id,
        "Membership publicized"
    );

    Ok(PublicizeMembershipResponse {
        org: org.name,
        username: target.username,
        is_public: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_error_messages() {
        assert_eq!(
            PublicizeMembershipError::NotSelf.to_string(),
            "Cannot publicize another member"
        );
        assert_eq!(
            PublicizeMembershipError::NotMember.to_string(),
            "Must be a member of the organization"
        );
    }
}
