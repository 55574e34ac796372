//! Conceal membership command
//!
//! Clears a membership's public-visibility flag. Authorization mirrors
//! publicize: self-service only, members only.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{memberships, organizations, users};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcealMembershipCommand {
    /// Organization name from the request path
    pub org: String,

    /// Target username from the request path
    pub username: String,

    /// The authenticated caller
    pub requester_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcealMembershipResponse {
    pub org: String,
    pub username: String,
    pub is_public: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConcealMembershipError {
    #[error("Organization '{0}' not found")]
    OrganizationNotFound(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Cannot conceal another member")]
    NotSelf,

    #[error("Must be a member of the organization")]
    NotMember,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ConcealMembershipResponse, ConcealMembershipError>>
    for ConcealMembershipCommand
{
}

impl crate::cqrs::middleware::Command for ConcealMembershipCommand {}

#[tracing::instrument(skip(pool), fields(org = %command.org, username = %command.username))]
pub async fn handle(
    pool: PgPool,
    command: ConcealMembershipCommand,
) -> Result<ConcealMembershipResponse, ConcealMembershipError> {
    let org = organizations::get_by_name(&pool, &command.org)
        .await?
        .ok_or_else(|| ConcealMembershipError::OrganizationNotFound(command.org.clone()))?;

    let target = users::get_by_username(&pool, &command.username)
        .await?
        .ok_or_else(|| ConcealMembershipError::UserNotFound(command.username.clone()))?;

    if target.id != command.requester_id {
        return Err(ConcealMembershipError::NotSelf);
    }

    let updated = memberships::set_visibility(&pool, org.id, target.id, false).await?;
    if updated == 0 {
        return Err(ConcealMembershipError::NotMember);
    }

    tracing::info!(
        org_id = %org.id,
        user_id = %target.id,
        "Membership concealed"
    );

    Ok(ConcealMembershipResponse {
        org: org.name,
        username: target.username,
        is_public: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_error_messages() {
        assert_eq!(
            ConcealMembershipError::NotSelf.to_string(),
            "Cannot conceal another member"
        );
        assert_eq!(
            ConcealMembershipError::NotMember.to_string(),
            "Must be a member of the organization"
        );
    }
}
