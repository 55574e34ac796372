//! Membership persistence
//!
//! Accessors and mutators for the `org_memberships` association table:
//! membership/ownership predicates, member listings joined against `users`,
//! visibility changes, and removal.

use sqlx::{FromRow, PgPool};
use thiserror::Error;
use uuid::Uuid;

/// A member row as returned by the listing queries: the user's public
/// profile joined with the membership visibility flag.
#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub email: String,
    pub avatar_url: Option<String>,
    pub is_public: bool,
}

#[derive(Debug, Error)]
pub enum RemoveMembershipError {
    #[error("cannot remove the last owner of the organization")]
    LastOwner,
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Whether the user belongs to the organization.
pub async fn is_member(pool: &PgPool, org_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM org_memberships WHERE org_id = $1 AND user_id = $2)",
    )
    .bind(org_id)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Whether the user's membership is flagged visible to non-members.
pub async fn is_public_member(
    pool: &PgPool,
    org_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(
             SELECT 1 FROM org_memberships
             WHERE org_id = $1 AND user_id = $2 AND is_public
         )",
    )
    .bind(org_id)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Whether the user owns the organization.
pub async fn is_owner(pool: &PgPool, org_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(
             SELECT 1 FROM org_memberships
             WHERE org_id = $1 AND user_id = $2 AND is_owner
         )",
    )
    .bind(org_id)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// List members of an organization ordered by username.
///
/// With `public_only`, rows whose membership is not flagged public are
/// filtered out.
pub async fn list_members(
    pool: &PgPool,
    org_id: Uuid,
    public_only: bool,
    limit: i64,
    offset: i64,
) -> Result<Vec<MemberRow>, sqlx::Error> {
    sqlx::query_as::<_, MemberRow>(
        "SELECT u.id, u.username, u.full_name, u.email, u.avatar_url, m.is_public
         FROM org_memberships m
         JOIN users u ON u.id = m.user_id
         WHERE m.org_id = $1 AND (NOT $2 OR m.is_public)
         ORDER BY LOWER(u.username)
         LIMIT $3 OFFSET $4",
    )
    .bind(org_id)
    .bind(public_only)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Count members matching the same filter as [`list_members`].
pub async fn count_members(
    pool: &PgPool,
    org_id: Uuid,
    public_only: bool,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM org_memberships WHERE org_id = $1 AND (NOT $2 OR is_public)",
    )
    .bind(org_id)
    .bind(public_only)
    .fetch_one(pool)
    .await
}

/// Flip a membership's public-visibility flag.
///
/// Returns the number of rows updated: zero means the user was not a member,
/// which callers treat as an authorization failure.
pub async fn set_visibility(
    pool: &PgPool,
    org_id: Uuid,
    user_id: Uuid,
    public: bool,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE org_memberships SET is_public = $3 WHERE org_id = $1 AND user_id = $2",
    )
    .bind(org_id)
    .bind(user_id)
    .bind(public)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Remove a user from an organization.
///
/// Removing someone who is not a member is a no-op. Removing the last
/// remaining owner is refused; the membership row is locked for the duration
/// of the check so concurrent removals cannot leave the organization
/// ownerless.
pub async fn remove(
    pool: &PgPool,
    org_id: Uuid,
    user_id: Uuid,
) -> Result<(), RemoveMembershipError> {
    let mut tx = pool.begin().await?;

    let membership = sqlx::query_as::<_, (Uuid, bool)>(
        "SELECT id, is_owner FROM org_memberships
         WHERE org_id = $1 AND user_id = $2
         FOR UPDATE",
    )
    .bind(org_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some((membership_id, is_owner)) = membership else {
        return Ok(());
    };

    if is_owner {
        let owners = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM org_memberships WHERE org_id = $1 AND is_owner",
        )
        .bind(org_id)
        .fetch_one(&mut *tx)
        .await?;

        if owners <= 1 {
            return Err(RemoveMembershipError::LastOwner);
        }
    }

    sqlx::query("DELETE FROM org_memberships WHERE id = $1")
        .bind(membership_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_error_display() {
        let err = RemoveMembershipError::LastOwner;
        assert_eq!(
            err.to_string(),
            "cannot remove the last owner of the organization"
        );
    }
}
