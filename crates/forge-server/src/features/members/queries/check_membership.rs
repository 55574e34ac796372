//! Membership check
//!
//! Answers "is this user a member of this organization?" for an
//! authenticated caller. What the caller may learn depends on their own
//! relationship to the organization: members get a definitive answer,
//! non-members are sent to the public check, and a non-member asking about
//! themselves gets a plain not-a-member answer.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{memberships, organizations, users};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckMembershipQuery {
    /// Organization name from the request path
    pub org: String,

    /// Target username from the request path
    pub username: String,

    /// The authenticated caller
    pub requester_id: Uuid,
}

/// Outcome of a membership check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckMembershipResponse {
    /// The target is a member (and the requester was allowed to know)
    Member,
    /// The target is not a member, or the requester asked about their own
    /// non-membership
    NotMember,
    /// The requester is not a member; only the public roster may answer
    CheckPublicly,
}

#[derive(Debug, thiserror::Error)]
pub enum CheckMembershipError {
    #[error("Organization '{0}' not found")]
    OrganizationNotFound(String),
    #[error("User '{0}' not found")]
    UserNotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<CheckMembershipResponse, CheckMembershipError>> for CheckMembershipQuery {}

impl crate::cqrs::middleware::Query for CheckMembershipQuery {}

#[tracing::instrument(skip(pool), fields(org = %query.org, username = %query.username))]
pub async fn handle(
    pool: PgPool,
    query: CheckMembershipQuery,
) -> Result<CheckMembershipResponse, CheckMembershipError> {
    let org = organizations::get_by_name(&pool, &query.org)
        .await?
        .ok_or_else(|| CheckMembershipError::OrganizationNotFound(query.org.clone()))?;

    let target = users::get_by_username(&pool, &query.username)
        .await?
        .ok_or_else(|| CheckMembershipError::UserNotFound(query.username.clone()))?;

    if memberships::is_member(&pool, org.id, query.requester_id).await? {
        if memberships::is_member(&pool, org.id, target.id).await? {
            Ok(CheckMembershipResponse::Member)
        } else {
            Ok(CheckMembershipResponse::NotMember)
        }
    } else if target.id == query.requester_id {
        Ok(CheckMembershipResponse::NotMember)
    } else {
        Ok(CheckMembershipResponse::CheckPublicly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CheckMembershipError::OrganizationNotFound("acme".to_string());
        assert_eq!(err.to_string(), "Organization 'acme' not found");

        let err = CheckMembershipError::UserNotFound("octocat".to_string());
        assert_eq!(err.to_string(), "User 'octocat' not found");
    }

    #[test]
    fn test_outcome_equality() {
        assert_eq!(
            CheckMembershipResponse::Member,
            CheckMembershipResponse::Member
        );
        assert_ne!(
            CheckMembershipResponse::NotMember,
            CheckMembershipResponse::CheckPublicly
        );
    }
}
