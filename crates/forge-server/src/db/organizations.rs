//! Organization persistence
//!
//! Accessors and mutators for the `organizations` table. Creating an
//! organization also seeds the creator's owner membership, so both writes
//! share one transaction here.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use uuid::Uuid;

/// An organization owning repositories and members.
#[derive(Debug, Clone, FromRow)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert a new organization.
#[derive(Debug, Clone)]
pub struct NewOrganization {
    pub name: String,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Error)]
pub enum CreateOrganizationDbError {
    #[error("organization name '{0}' is already taken")]
    DuplicateName(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const ORG_COLUMNS: &str =
    "id, name, full_name, description, website, location, avatar_url, created_at, updated_at";

/// Fetch an organization by name, case-insensitively.
pub async fn get_by_name(pool: &PgPool, name: &str) -> Result<Option<Organization>, sqlx::Error> {
    sqlx::query_as::<_, Organization>(&format!(
        "SELECT {ORG_COLUMNS} FROM organizations WHERE LOWER(name) = LOWER($1)"
    ))
    .bind(name)
    .fetch_optional(pool)
    .await
}

/// List organizations ordered by name, optionally filtered by a
/// case-insensitive name fragment.
pub async fn list(
    pool: &PgPool,
    name_contains: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Organization>, sqlx::Error> {
    let pattern = name_contains.map(|s| format!("%{}%", s.to_lowercase()));

    sqlx::query_as::<_, Organization>(&format!(
        "SELECT {ORG_COLUMNS}
         FROM organizations
         WHERE ($1::TEXT IS NULL OR LOWER(name) LIKE $1)
         ORDER BY LOWER(name)
         LIMIT $2 OFFSET $3"
    ))
    .bind(pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Count organizations matching the same filter as [`list`].
pub async fn count(pool: &PgPool, name_contains: Option<&str>) -> Result<i64, sqlx::Error> {
    let pattern = name_contains.map(|s| format!("%{}%", s.to_lowercase()));

    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM organizations WHERE ($1::TEXT IS NULL OR LOWER(name) LIKE $1)",
    )
    .bind(pattern)
    .fetch_one(pool)
    .await
}

/// Insert an organization and its creator's owner membership atomically.
pub async fn create_with_owner(
    pool: &PgPool,
    org: NewOrganization,
    owner_id: Uuid,
) -> Result<Organization, CreateOrganizationDbError> {
    let mut tx = pool.begin().await?;

    let created = sqlx::query_as::<_, Organization>(&format!(
        "INSERT INTO organizations (name, full_name, description, website, location)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {ORG_COLUMNS}"
    ))
    .bind(&org.name)
    .bind(&org.full_name)
    .bind(&org.description)
    .bind(&org.website)
    .bind(&org.location)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return CreateOrganizationDbError::DuplicateName(org.name.clone());
            }
        }
        CreateOrganizationDbError::Sqlx(e)
    })?;

    sqlx::query(
        "INSERT INTO org_memberships (org_id, user_id, is_public, is_owner)
         VALUES ($1, $2, FALSE, TRUE)",
    )
    .bind(created.id)
    .bind(owner_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(created)
}
