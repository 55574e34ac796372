use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::organizations;
use crate::features::shared::pagination::{PaginationMetadata, PaginationParams};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListOrganizationsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_contains: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationListItem {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOrganizationsResponse {
    pub items: Vec<OrganizationListItem>,
    pub pagination: PaginationMetadata,
}

#[derive(Debug, thiserror::Error)]
pub enum ListOrganizationsError {
    #[error("Page must be greater than 0")]
    InvalidPage,
    #[error("Per page must be between 1 and 100")]
    InvalidPerPage,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListOrganizationsResponse, ListOrganizationsError>>
    for ListOrganizationsQuery
{
}

impl crate::cqrs::middleware::Query for ListOrganizationsQuery {}

impl ListOrganizationsQuery {
    pub fn validate(&self) -> Result<(), ListOrganizationsError> {
        if let Some(page) = self.page {
            if page < 1 {
                return Err(ListOrganizationsError::InvalidPage);
            }
        }
        if let Some(per_page) = self.per_page {
            if !(1..=100).contains(&per_page) {
                return Err(ListOrganizationsError::InvalidPerPage);
            }
        }
        Ok(())
    }

    fn params(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.per_page)
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: ListOrganizationsQuery,
) -> Result<ListOrganizationsResponse, ListOrganizationsError> {
    query.validate()?;
    let params = query.params();

    let total = organizations::count(&pool, query.name_contains.as_deref()).await?;
    let rows = organizations::list(
        &pool,
        query.name_contains.as_deref(),
        params.per_page(),
        params.offset(),
    )
    .await?;

    let items = rows
        .into_iter()
        .map(|org| OrganizationListItem {
            id: org.id,
            name: org.name,
            full_name: org.full_name,
            description: org.description,
            avatar_url: org.avatar_url,
            created_at: org.created_at,
        })
        .collect();

    Ok(ListOrganizationsResponse {
        items,
        pagination: PaginationMetadata::from_params(&params, total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_defaults_ok() {
        assert!(ListOrganizationsQuery::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_page() {
        let query = ListOrganizationsQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            query.validate(),
            Err(ListOrganizationsError::InvalidPage)
        ));
    }

    #[test]
    fn test_validation_rejects_oversized_per_page() {
        let query = ListOrganizationsQuery {
            per_page: Some(101),
            ..Default::default()
        };
        assert!(matches!(
            query.validate(),
            Err(ListOrganizationsError::InvalidPerPage)
        ));
    }
}
