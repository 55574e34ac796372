//! Requester context resolution
//!
//! Authentication itself happens upstream (session or token middleware at the
//! platform edge); by the time a request reaches this service the caller's
//! identity arrives in the `x-user-id` header. This middleware resolves that
//! header against the `users` table and injects a [`Requester`] extension for
//! the handlers, rejecting requests that carry no resolvable identity.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::response::ErrorResponse;
use crate::db;

/// Header carrying the authenticated caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, as resolved by [`require_requester`].
#[derive(Debug, Clone)]
pub struct Requester {
    pub id: Uuid,
    pub username: String,
}

/// Resolve the caller's identity and make it available to handlers.
///
/// Responses produced here:
/// - `401` when the header is missing or names an unknown user
/// - `400` when the header is not a UUID
/// - `500` when the lookup itself fails
#[tracing::instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn require_requester(
    State(pool): State<PgPool>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(raw) = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
    else {
        let error = ErrorResponse::new("UNAUTHORIZED", "Authentication required");
        return (StatusCode::UNAUTHORIZED, Json(error)).into_response();
    };

    let Ok(user_id) = Uuid::parse_str(raw) else {
        let error = ErrorResponse::new("BAD_REQUEST", "x-user-id must be a UUID");
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    };

    match db::users::get_by_id(&pool, user_id).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(Requester {
                id: user.id,
                username: user.username,
            });
            next.run(request).await
        },
        Ok(None) => {
            tracing::debug!(user_id = %user_id, "Requester not found");
            let error = ErrorResponse::new("UNAUTHORIZED", "Authentication required");
            (StatusCode::UNAUTHORIZED, Json(error)).into_response()
        },
        Err(e) => {
            tracing::error!("Database error while resolving requester: {}", e);
            let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        },
    }
}
