//! Public-membership check
//!
//! Answers "is this user a public member of this organization?". The answer
//! is the same for every caller, so no requester context is involved.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::db::{memberships, organizations, users};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckPublicMembershipQuery {
    /// Organization name from the request path
    pub org: String,

    /// Target username from the request path
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckPublicMembershipResponse {
    pub is_public_member: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CheckPublicMembershipError {
    #[error("Organization '{0}' not found")]
    OrganizationNotFound(String),
    #[error("User '{0}' not found")]
    UserNotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<CheckPublicMembershipResponse, CheckPublicMembershipError>>
    for CheckPublicMembershipQuery
{
}

impl crate::cqrs::middleware::Query for CheckPublicMembershipQuery {}

#[tracing::instrument(skip(pool), fields(org = %query.org, username = %query.username))]
pub async fn handle(
    pool: PgPool,
    query: CheckPublicMembershipQuery,
) -> Result<CheckPublicMembershipResponse, CheckPublicMembershipError> {
    let org = organizations::get_by_name(&pool, &query.org)
        .await?
        .ok_or_else(|| CheckPublicMembershipError::OrganizationNotFound(query.org.clone()))?;

    let target = users::get_by_username(&pool, &query.username)
        .await?
        .ok_or_else(|| CheckPublicMembershipError::UserNotFound(query.username.clone()))?;

    let is_public_member = memberships::is_public_member(&pool, org.id, target.id).await?;

    Ok(CheckPublicMembershipResponse { is_public_member })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CheckPublicMembershipError::UserNotFound("octocat".to_string());
        assert_eq!(err.to_string(), "User 'octocat' not found");
    }
}
