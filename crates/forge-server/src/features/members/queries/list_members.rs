//! List an organization's members
//!
//! One query backs both member listings. The full roster is only visible to
//! members: when the requester is not one (or the public listing was asked
//! for explicitly), the result is restricted to memberships flagged public.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{memberships, organizations};
use crate::features::shared::pagination::{PaginationMetadata, PaginationParams};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMembersQuery {
    /// Organization name from the request path
    pub org: String,

    /// The authenticated caller; `None` restricts the listing to public
    /// members regardless of anything else.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<Uuid>,

    /// Force the public-only view (the `public_members` endpoint)
    #[serde(default)]
    pub public_only: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
}

/// A member in the platform's public user format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSummary {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMembersResponse {
    pub items: Vec<MemberSummary>,
    pub pagination: PaginationMetadata,
}

#[derive(Debug, thiserror::Error)]
pub enum ListMembersError {
    #[error("Organization '{0}' not found")]
    OrganizationNotFound(String),
    #[error("Page must be greater than 0")]
    InvalidPage,
    #[error("Per page must be between 1 and 100")]
    InvalidPerPage,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListMembersResponse, ListMembersError>> for ListMembersQuery {}

impl crate::cqrs::middleware::Query for ListMembersQuery {}

impl ListMembersQuery {
    pub fn validate(&self) -> Result<(), ListMembersError> {
        if let Some(page) = self.page {
            if page < 1 {
                return Err(ListMembersError::InvalidPage);
            }
        }
        if let Some(per_page) = self.per_page {
            if !(1..=100).contains(&per_page) {
                return Err(ListMembersError::InvalidPerPage);
            }
        }
        Ok(())
    }

    fn params(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.per_page)
    }
}

#[tracing::instrument(skip(pool), fields(org = %query.org, public_only = query.public_only))]
pub async fn handle(
    pool: PgPool,
    query: ListMembersQuery,
) -> Result<ListMembersResponse, ListMembersError> {
    query.validate()?;
    let params = query.params();

    let org = organizations::get_by_name(&pool, &query.org)
        .await?
        .ok_or_else(|| ListMembersError::OrganizationNotFound(query.org.clone()))?;

    // Non-members only ever see the public roster.
    let public_only = match (query.public_only, query.requester_id) {
        (true, _) | (false, None) => true,
        (false, Some(requester_id)) => !memberships::is_member(&pool, org.id, requester_id).await?,
    };

    let total = memberships::count_members(&pool, org.id, public_only).await?;
    let rows = memberships::list_members(
        &pool,
        org.id,
        public_only,
        params.per_page(),
        params.offset(),
    )
    .await?;

    let items = rows
        .into_iter()
        .map(|row| MemberSummary {
            id: row.id,
            username: row.username,
            full_name: row.full_name,
            email: row.email,
            avatar_url: row.avatar_url,
        })
        .collect();

    Ok(ListMembersResponse {
        items,
        pagination: PaginationMetadata::from_params(&params, total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> ListMembersQuery {
        ListMembersQuery {
            org: "acme".to_string(),
            requester_id: Some(Uuid::new_v4()),
            public_only: false,
            page: None,
            per_page: None,
        }
    }

    #[test]
    fn test_validation_defaults_ok() {
        assert!(query().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_page() {
        let mut q = query();
        q.page = Some(0);
        assert!(matches!(q.validate(), Err(ListMembersError::InvalidPage)));
    }

    #[test]
    fn test_validation_rejects_oversized_per_page() {
        let mut q = query();
        q.per_page = Some(500);
        assert!(matches!(q.validate(), Err(ListMembersError::InvalidPerPage)));
    }

    #[test]
    fn test_member_summary_omits_empty_fields() {
        let summary = MemberSummary {
            id: Uuid::new_v4(),
            username: "octocat".to_string(),
            full_name: None,
            email: "octocat@example.com".to_string(),
            avatar_url: None,
        };
        let body = serde_json::to_value(&summary).unwrap();
        assert!(body.get("full_name").is_none());
        assert_eq!(body["username"], "octocat");
    }
}
