use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::organizations;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetOrganizationQuery {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetOrganizationResponse {
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetOrganizationError {
    #[error("Organization '{0}' not found")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<GetOrganizationResponse, GetOrganizationError>> for GetOrganizationQuery {}

impl crate::cqrs::middleware::Query for GetOrganizationQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetOrganizationQuery,
) -> Result<GetOrganizationResponse, GetOrganizationError> {
    let org = organizations::get_by_name(&pool, &query.name)
        .await?
        .ok_or_else(|| GetOrganizationError::NotFound(query.name.clone()))?;

    Ok(GetOrganizationResponse {
        id: org.id,
        name: org.name,
        full_name: org.full_name,
        description: org.description,
        website: org.website,
        location: org.location,
        avatar_url: org.avatar_url,
        created_at: org.created_at,
        updated_at: org.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = GetOrganizationError::NotFound("acme".to_string());
        assert_eq!(err.to_string(), "Organization 'acme' not found");
    }

    #[test]
    fn test_response_omits_empty_fields() {
        let response = GetOrganizationResponse {
            id: Uuid::new_v4(),
            name: "acme".to_string(),
            full_name: None,
            description: None,
            website: None,
            location: None,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let body = serde_json::to_value(&response).unwrap();
        assert!(body.get("full_name").is_none());
        assert_eq!(body["name"], "acme");
    }
}
