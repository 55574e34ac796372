//! Organization API routes
//!
//! Wires the organization commands and queries to Axum HTTP handlers.
//!
//! # Route Structure
//!
//! - `POST /api/v1/orgs` - Create a new organization
//! - `GET /api/v1/orgs` - List organizations with pagination
//! - `GET /api/v1/orgs/:org` - Get a single organization by name

use crate::api::response::{ApiResponse, ErrorResponse};
use crate::middleware::auth::Requester;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use super::{
    commands::{CreateOrganizationCommand, CreateOrganizationError},
    queries::{GetOrganizationQuery, ListOrganizationsQuery},
};

// ============================================================================
// Router Configuration
// ============================================================================

/// Creates the organizations router with all routes configured
pub fn organizations_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_organizations).post(create_organization))
        .route("/:org", get(get_organization))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Create a new organization
///
/// # Endpoint
///
/// `POST /api/v1/orgs`
///
/// # Response
///
/// - `201 Created` - Organization created; the requester becomes its owner
/// - `400 Bad Request` - Validation error
/// - `409 Conflict` - Organization with that name already exists
/// - `500 Internal Server Error` - Database error
#[tracing::instrument(skip(pool, command, requester), fields(name = %command.name, requester = %requester.username))]
async fn create_organization(
    State(pool): State<PgPool>,
    Extension(requester): Extension<Requester>,
    Json(mut command): Json<CreateOrganizationCommand>,
) -> Result<Response, OrganizationApiError> {
    command.creator_id = requester.id;

    let response = super::commands::create::handle(pool, command).await?;

    tracing::info!(
        org_id = %response.id,
        org_name = %response.name,
        "Organization created via API"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::success(response))).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// Get a single organization by name
///
/// # Endpoint
///
/// `GET /api/v1/orgs/:org`
///
/// # Response
///
/// - `200 OK` - Organization found
/// - `404 Not Found` - Organization not found
/// - `500 Internal Server Error` - Database error
#[tracing::instrument(skip(pool), fields(org = %org))]
async fn get_organization(
    State(pool): State<PgPool>,
    Path(org): Path<String>,
) -> Result<Response, OrganizationApiError> {
    let query = GetOrganizationQuery { name: org };

    let response = super::queries::get::handle(pool, query).await?;

    tracing::debug!(
        org_id = %response.id,
        org_name = %response.name,
        "Organization retrieved via API"
    );

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// List organizations with pagination
///
/// # Endpoint
///
/// `GET /api/v1/orgs?page=1&per_page=30&name_contains=acme`
///
/// # Response
///
/// - `200 OK` - List of organizations with pagination metadata
/// - `400 Bad Request` - Invalid query parameters
/// - `500 Internal Server Error` - Database error
#[tracing::instrument(skip(pool, query), fields(page = ?query.page, per_page = ?query.per_page))]
async fn list_organizations(
    State(pool): State<PgPool>,
    Query(query): Query<ListOrganizationsQuery>,
) -> Result<Response, OrganizationApiError> {
    let response = super::queries::list::handle(pool, query).await?;

    tracing::debug!(
        count = response.items.len(),
        total = response.pagination.total,
        "Organizations listed via API"
    );

    let meta = json!({
        "pagination": response.pagination
    });

    Ok(
        (StatusCode::OK, Json(ApiResponse::success_with_meta(response.items, meta)))
            .into_response(),
    )
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for organization API endpoints
#[derive(Debug)]
enum OrganizationApiError {
    CreateError(CreateOrganizationError),
    GetError(super::queries::GetOrganizationError),
    ListError(super::queries::ListOrganizationsError),
}

impl From<CreateOrganizationError> for OrganizationApiError {
    fn from(err: CreateOrganizationError) -> Self {
        Self::CreateError(err)
    }
}

impl From<super::queries::GetOrganizationError> for OrganizationApiError {
    fn from(err: super::queries::GetOrganizationError) -> Self {
        Self::GetError(err)
    }
}

impl From<super::queries::ListOrganizationsError> for OrganizationApiError {
    fn from(err: super::queries::ListOrganizationsError) -> Self {
        Self::ListError(err)
    }
}

impl IntoResponse for OrganizationApiError {
    fn into_response(self) -> Response {
        match self {
            // Create errors
            OrganizationApiError::CreateError(CreateOrganizationError::NameValidation(_))
            | OrganizationApiError::CreateError(
                CreateOrganizationError::DisplayNameValidation(_),
            )
            | OrganizationApiError::CreateError(CreateOrganizationError::UrlValidation(_)) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            OrganizationApiError::CreateError(CreateOrganizationError::DuplicateName(name)) => {
                let error = ErrorResponse::new(
                    "CONFLICT",
                    format!("Organization '{}' already exists", name),
                );
                (StatusCode::CONFLICT, Json(error)).into_response()
            },
            OrganizationApiError::CreateError(CreateOrganizationError::Database(_)) => {
                tracing::error!("Database error during organization creation: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            // Get errors
            OrganizationApiError::GetError(super::queries::GetOrganizationError::NotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            OrganizationApiError::GetError(super::queries::GetOrganizationError::Database(_)) => {
                tracing::error!("Database error during organization retrieval: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            // List errors
            OrganizationApiError::ListError(
                super::queries::ListOrganizationsError::InvalidPage,
            )
            | OrganizationApiError::ListError(
                super::queries::ListOrganizationsError::InvalidPerPage,
            ) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            OrganizationApiError::ListError(super::queries::ListOrganizationsError::Database(
                _,
            )) => {
                tracing::error!("Database error during organizations listing: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
        }
    }
}

impl std::fmt::Display for OrganizationApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateError(e) => write!(f, "{}", e),
            Self::GetError(e) => write!(f, "{}", e),
            Self::ListError(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::validation::OrgNameValidationError;

    fn status_of(err: OrganizationApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_create_error_statuses() {
        assert_eq!(
            status_of(OrganizationApiError::CreateError(
                CreateOrganizationError::NameValidation(OrgNameValidationError::Required)
            )),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(OrganizationApiError::CreateError(
                CreateOrganizationError::DuplicateName("acme".to_string())
            )),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_get_error_statuses() {
        assert_eq!(
            status_of(OrganizationApiError::GetError(
                super::super::queries::GetOrganizationError::NotFound("acme".to_string())
            )),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_list_error_statuses() {
        assert_eq!(
            status_of(OrganizationApiError::ListError(
                super::super::queries::ListOrganizationsError::InvalidPage
            )),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_routes_structure() {
        let router = organizations_routes();
        assert!(format!("{:?}", router).contains("Router"));
    }
}
