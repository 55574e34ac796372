//! Membership API routes
//!
//! Wires the membership commands and queries to Axum HTTP handlers.
//!
//! # Route Structure
//!
//! - `GET /api/v1/orgs/:org/members` - List members (full roster for members,
//!   public roster otherwise)
//! - `GET /api/v1/orgs/:org/members/:username` - Membership check
//! - `DELETE /api/v1/orgs/:org/members/:username` - Remove a member
//! - `GET /api/v1/orgs/:org/public_members` - List public members
//! - `GET /api/v1/orgs/:org/public_members/:username` - Public-membership check
//! - `PUT /api/v1/orgs/:org/public_members/:username` - Publicize own membership
//! - `DELETE /api/v1/orgs/:org/public_members/:username` - Conceal own membership

use crate::api::response::{ApiResponse, ErrorResponse};
use crate::middleware::auth::Requester;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use super::{
    commands::{
        ConcealMembershipCommand, ConcealMembershipError, PublicizeMembershipCommand,
        PublicizeMembershipError, RemoveMemberCommand, RemoveMemberError,
    },
    queries::{
        CheckMembershipQuery, CheckMembershipResponse, CheckPublicMembershipQuery,
        ListMembersQuery,
    },
};
use crate::db::memberships::RemoveMembershipError;

// ============================================================================
// Router Configuration
// ============================================================================

/// State for the membership routes: the pool plus the public base URL the
/// membership-check redirect is built against.
#[derive(Clone)]
pub struct MembersState {
    pub db: PgPool,
    pub base_url: String,
}

/// Creates the membership router with all routes configured
pub fn members_routes() -> Router<MembersState> {
    Router::new()
        .route("/:org/members", get(list_members))
        .route(
            "/:org/members/:username",
            get(check_membership).delete(remove_member),
        )
        .route("/:org/public_members", get(list_public_members))
        .route(
            "/:org/public_members/:username",
            get(check_public_membership)
                .put(publicize_membership)
                .patch(publicize_membership)
                .delete(conceal_membership),
        )
}

/// Pagination parameters accepted by the member listings
#[derive(Debug, Default, Deserialize)]
struct MemberListParams {
    page: Option<i64>,
    per_page: Option<i64>,
}

/// Location of the public-membership check for the same org and user.
fn public_membership_url(base_url: &str, org: &str, username: &str) -> String {
    format!(
        "{}/api/v1/orgs/{}/public_members/{}",
        base_url.trim_end_matches('/'),
        org,
        username
    )
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// List an organization's members
///
/// # Endpoint
///
/// `GET /api/v1/orgs/:org/members`
///
/// # Response
///
/// - `200 OK` - JSON array of member objects. The full roster when the
///   requester is a member, public members only otherwise.
/// - `404 Not Found` - Organization not found
/// - `500 Internal Server Error` - Database error
#[tracing::instrument(skip(state, requester, params), fields(org = %org, requester = %requester.username))]
async fn list_members(
    State(state): State<MembersState>,
    Extension(requester): Extension<Requester>,
    Path(org): Path<String>,
    Query(params): Query<MemberListParams>,
) -> Result<Response, MemberApiError> {
    let query = ListMembersQuery {
        org,
        requester_id: Some(requester.id),
        public_only: false,
        page: params.page,
        per_page: params.per_page,
    };

    let response = super::queries::list_members::handle(state.db, query).await?;

    tracing::debug!(
        count = response.items.len(),
        total = response.pagination.total,
        "Members listed via API"
    );

    let meta = json!({
        "pagination": response.pagination
    });

    Ok(
        (StatusCode::OK, Json(ApiResponse::success_with_meta(response.items, meta)))
            .into_response(),
    )
}

/// List an organization's public members
///
/// # Endpoint
///
/// `GET /api/v1/orgs/:org/public_members`
///
/// # Response
///
/// - `200 OK` - JSON array of public member objects
/// - `404 Not Found` - Organization not found
/// - `500 Internal Server Error` - Database error
#[tracing::instrument(skip(state, params), fields(org = %org))]
async fn list_public_members(
    State(state): State<MembersState>,
    Path(org): Path<String>,
    Query(params): Query<MemberListParams>,
) -> Result<Response, MemberApiError> {
    let query = ListMembersQuery {
        org,
        requester_id: None,
        public_only: true,
        page: params.page,
        per_page: params.per_page,
    };

    let response = super::queries::list_members::handle(state.db, query).await?;

    tracing::debug!(
        count = response.items.len(),
        total = response.pagination.total,
        "Public members listed via API"
    );

    let meta = json!({
        "pagination": response.pagination
    });

    Ok(
        (StatusCode::OK, Json(ApiResponse::success_with_meta(response.items, meta)))
            .into_response(),
    )
}

/// Check if a user is a member of an organization
///
/// # Endpoint
///
/// `GET /api/v1/orgs/:org/members/:username`
///
/// # Response
///
/// - `204 No Content` - Requester and target are both members
/// - `404 Not Found` - Target is not a member (or the requester asked about
///   their own non-membership), or the org/user does not exist
/// - `302 Found` - Requester is not a member; redirects to the
///   public-membership check
/// - `500 Internal Server Error` - Database error
#[tracing::instrument(skip(state, requester), fields(org = %org, username = %username))]
async fn check_membership(
    State(state): State<MembersState>,
    Extension(requester): Extension<Requester>,
    Path((org, username)): Path<(String, String)>,
) -> Result<Response, MemberApiError> {
    let query = CheckMembershipQuery {
        org: org.clone(),
        username: username.clone(),
        requester_id: requester.id,
    };

    let outcome = super::queries::check_membership::handle(state.db, query).await?;

    Ok(match outcome {
        CheckMembershipResponse::Member => StatusCode::NO_CONTENT.into_response(),
        CheckMembershipResponse::NotMember => StatusCode::NOT_FOUND.into_response(),
        CheckMembershipResponse::CheckPublicly => {
            let location = public_membership_url(&state.base_url, &org, &username);
            (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
        },
    })
}

/// Check if a user is a public member of an organization
///
/// # Endpoint
///
/// `GET /api/v1/orgs/:org/public_members/:username`
///
/// # Response
///
/// - `204 No Content` - Target is a public member
/// - `404 Not Found` - Target is not a public member, or the org/user does
///   not exist
/// - `500 Internal Server Error` - Database error
#[tracing::instrument(skip(state), fields(org = %org, username = %username))]
async fn check_public_membership(
    State(state): State<MembersState>,
    Path((org, username)): Path<(String, String)>,
) -> Result<Response, MemberApiError> {
    let query = CheckPublicMembershipQuery { org, username };

    let response = super::queries::check_public_membership::handle(state.db, query).await?;

    Ok(if response.is_public_member {
        StatusCode::NO_CONTENT.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    })
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Make a member's membership public
///
/// # Endpoint
///
/// `PUT /api/v1/orgs/:org/public_members/:username` (also accepts `PATCH`)
///
/// # Response
///
/// - `204 No Content` - Membership publicized
/// - `403 Forbidden` - Target is not the requester, or not a member
/// - `404 Not Found` - Organization or user not found
/// - `500 Internal Server Error` - Database error
#[tracing::instrument(skip(state, requester), fields(org = %org, username = %username))]
async fn publicize_membership(
    State(state): State<MembersState>,
    Extension(requester): Extension<Requester>,
    Path((org, username)): Path<(String, String)>,
) -> Result<Response, MemberApiError> {
    let command = PublicizeMembershipCommand {
        org,
        username,
        requester_id: requester.id,
    };

    let response = super::commands::publicize::handle(state.db, command).await?;

    tracing::info!(
        org = %response.org,
        username = %response.username,
        "Membership publicized via API"
    );

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Make a member's membership private again
///
/// # Endpoint
///
/// `DELETE /api/v1/orgs/:org/public_members/:username`
///
/// # Response
///
/// - `204 No Content` - Membership concealed
/// - `403 Forbidden` - Target is not the requester, or not a member
/// - `404 Not Found` - Organization or user not found
/// - `500 Internal Server Error` - Database error
#[tracing::instrument(skip(state, requester), fields(org = %org, username = %username))]
async fn conceal_membership(
    State(state): State<MembersState>,
    Extension(requester): Extension<Requester>,
    Path((org, username)): Path<(String, String)>,
) -> Result<Response, MemberApiError> {
    let command = ConcealMembershipCommand {
        org,
        username,
        requester_id: requester.id,
    };

    let response = super::commands::conceal::handle(state.db, command).await?;

    tracing::info!(
        org = %response.org,
        username = %response.username,
        "Membership concealed via API"
    );

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Remove a member from an organization
///
/// # Endpoint
///
/// `DELETE /api/v1/orgs/:org/members/:username`
///
/// # Response
///
/// - `204 No Content` - Member removed (or was not a member to begin with)
/// - `403 Forbidden` - Requester does not own the organization
/// - `404 Not Found` - Organization or user not found
/// - `500 Internal Server Error` - Persistence layer refused the removal,
///   or a database error occurred
#[tracing::instrument(skip(state, requester), fields(org = %org, username = %username))]
async fn remove_member(
    State(state): State<MembersState>,
    Extension(requester): Extension<Requester>,
    Path((org, username)): Path<(String, String)>,
) -> Result<Response, MemberApiError> {
    let command = RemoveMemberCommand {
        org,
        username,
        requester_id: requester.id,
    };

    let response = super::commands::remove::handle(state.db, command).await?;

    tracing::info!(
        org = %response.org,
        username = %response.username,
        "Member removed via API"
    );

    Ok(StatusCode::NO_CONTENT.into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for membership API endpoints
#[derive(Debug)]
enum MemberApiError {
    ListError(super::queries::ListMembersError),
    CheckError(super::queries::CheckMembershipError),
    CheckPublicError(super::queries::CheckPublicMembershipError),
    PublicizeError(PublicizeMembershipError),
    ConcealError(ConcealMembershipError),
    RemoveError(RemoveMemberError),
}

impl From<super::queries::ListMembersError> for MemberApiError {
    fn from(err: super::queries::ListMembersError) -> Self {
        Self::ListError(err)
    }
}

impl From<super::queries::CheckMembershipError> for MemberApiError {
    fn from(err: super::queries::CheckMembershipError) -> Self {
        Self::CheckError(err)
    }
}

impl From<super::queries::CheckPublicMembershipError> for MemberApiError {
    fn from(err: super::queries::CheckPublicMembershipError) -> Self {
        Self::CheckPublicError(err)
    }
}

impl From<PublicizeMembershipError> for MemberApiError {
    fn from(err: PublicizeMembershipError) -> Self {
        Self::PublicizeError(err)
    }
}

impl From<ConcealMembershipError> for MemberApiError {
    fn from(err: ConcealMembershipError) -> Self {
        Self::ConcealError(err)
    }
}

impl From<RemoveMemberError> for MemberApiError {
    fn from(err: RemoveMemberError) -> Self {
        Self::RemoveError(err)
    }
}

impl IntoResponse for MemberApiError {
    fn into_response(self) -> Response {
        use super::queries::{CheckMembershipError, CheckPublicMembershipError, ListMembersError};

        match self {
            // List errors
            MemberApiError::ListError(ListMembersError::OrganizationNotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            MemberApiError::ListError(ListMembersError::InvalidPage)
            | MemberApiError::ListError(ListMembersError::InvalidPerPage) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            MemberApiError::ListError(ListMembersError::Database(_)) => {
                tracing::error!("Database error during member listing: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            // Membership-check errors
            MemberApiError::CheckError(CheckMembershipError::OrganizationNotFound(_))
            | MemberApiError::CheckError(CheckMembershipError::UserNotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            MemberApiError::CheckError(CheckMembershipError::Database(_)) => {
                tracing::error!("Database error during membership check: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            // Public-membership-check errors
            MemberApiError::CheckPublicError(
                CheckPublicMembershipError::OrganizationNotFound(_),
            )
            | MemberApiError::CheckPublicError(CheckPublicMembershipError::UserNotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            MemberApiError::CheckPublicError(CheckPublicMembershipError::Database(_)) => {
                tracing::error!("Database error during public-membership check: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            // Publicize errors
            MemberApiError::PublicizeError(PublicizeMembershipError::OrganizationNotFound(_))
            | MemberApiError::PublicizeError(PublicizeMembershipError::UserNotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            MemberApiError::PublicizeError(PublicizeMembershipError::NotSelf)
            | MemberApiError::PublicizeError(PublicizeMembershipError::NotMember) => {
                let error = ErrorResponse::new("FORBIDDEN", self.to_string());
                (StatusCode::FORBIDDEN, Json(error)).into_response()
            },
            MemberApiError::PublicizeError(PublicizeMembershipError::Database(_)) => {
                tracing::error!("Database error during membership publicize: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            // Conceal errors
            MemberApiError::ConcealError(ConcealMembershipError::OrganizationNotFound(_))
            | MemberApiError::ConcealError(ConcealMembershipError::UserNotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            MemberApiError::ConcealError(ConcealMembershipError::NotSelf)
            | MemberApiError::ConcealError(ConcealMembershipError::NotMember) => {
                let error = ErrorResponse::new("FORBIDDEN", self.to_string());
                (StatusCode::FORBIDDEN, Json(error)).into_response()
            },
            MemberApiError::ConcealError(ConcealMembershipError::Database(_)) => {
                tracing::error!("Database error during membership conceal: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            // Remove errors
            MemberApiError::RemoveError(RemoveMemberError::OrganizationNotFound(_))
            | MemberApiError::RemoveError(RemoveMemberError::UserNotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            MemberApiError::RemoveError(RemoveMemberError::NotOwner) => {
                let error = ErrorResponse::new("FORBIDDEN", self.to_string());
                (StatusCode::FORBIDDEN, Json(error)).into_response()
            },
            MemberApiError::RemoveError(RemoveMemberError::Removal(
                RemoveMembershipError::LastOwner,
            )) => {
                // The persistence layer refused; surface its reason.
                let error = ErrorResponse::new("INTERNAL_ERROR", self.to_string());
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
            MemberApiError::RemoveError(RemoveMemberError::Removal(
                RemoveMembershipError::Sqlx(_),
            ))
            | MemberApiError::RemoveError(RemoveMemberError::Database(_)) => {
                tracing::error!("Database error during member removal: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
        }
    }
}

impl std::fmt::Display for MemberApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ListError(e) => write!(f, "{}", e),
            Self::CheckError(e) => write!(f, "{}", e),
            Self::CheckPublicError(e) => write!(f, "{}", e),
            Self::PublicizeError(e) => write!(f, "{}", e),
            Self::ConcealError(e) => write!(f, "{}", e),
            Self::RemoveError(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::members::queries::{CheckMembershipError, ListMembersError};

    fn status_of(err: MemberApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_public_membership_url() {
        assert_eq!(
            public_membership_url("http://localhost:3000", "acme", "octocat"),
            "http://localhost:3000/api/v1/orgs/acme/public_members/octocat"
        );
        // A trailing slash on the base URL must not double up.
        assert_eq!(
            public_membership_url("https://forge.example/", "acme", "octocat"),
            "https://forge.example/api/v1/orgs/acme/public_members/octocat"
        );
    }

    #[test]
    fn test_not_found_statuses() {
        assert_eq!(
            status_of(MemberApiError::ListError(
                ListMembersError::OrganizationNotFound("acme".to_string())
            )),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(MemberApiError::CheckError(
                CheckMembershipError::UserNotFound("octocat".to_string())
            )),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_authorization_statuses() {
        assert_eq!(
            status_of(MemberApiError::PublicizeError(
                PublicizeMembershipError::NotSelf
            )),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(MemberApiError::PublicizeError(
                PublicizeMembershipError::NotMember
            )),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(MemberApiError::ConcealError(ConcealMembershipError::NotSelf)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(MemberApiError::RemoveError(RemoveMemberError::NotOwner)),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_last_owner_maps_to_internal_error() {
        let err = MemberApiError::RemoveError(RemoveMemberError::Removal(
            RemoveMembershipError::LastOwner,
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_statuses() {
        assert_eq!(
            status_of(MemberApiError::ListError(ListMembersError::InvalidPage)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_routes_structure() {
        let router = members_routes();
        assert!(format!("{:?}", router).contains("Router"));
    }
}
