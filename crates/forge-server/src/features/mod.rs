//! Feature modules implementing the Forge API
//!
//! Each feature is a vertical slice following the CQRS (Command Query
//! Responsibility Segregation) pattern, with its own commands, queries,
//! and routes.
//!
//! # Features
//!
//! - **organizations**: organization reads and creation
//! - **members**: organization-membership management (listing, membership
//!   checks, visibility changes, removal)
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations
//! - `queries/` - Read operations
//! - `routes.rs` - HTTP route definitions
//!
//! Commands and queries implement the mediator pattern using the `mediator`
//! crate, enabling clean separation of concerns and easy testing.

pub mod members;
pub mod organizations;
pub mod shared;

use axum::Router;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// PostgreSQL connection pool for database operations
    pub db: sqlx::PgPool,
    /// Public base URL of the deployment, used for redirect construction
    pub base_url: String,
}

/// Creates the main API router with all feature routes mounted
///
/// Organization and membership routes both live under `/orgs`:
/// - `/orgs` - Organization listing and creation
/// - `/orgs/:org` - Single organization
/// - `/orgs/:org/members`, `/orgs/:org/public_members` - Membership
pub fn router(state: FeatureState) -> Router<()> {
    let members_state = members::MembersState {
        db: state.db.clone(),
        base_url: state.base_url.clone(),
    };

    let orgs = organizations::organizations_routes()
        .with_state(state.db.clone())
        .merge(members::members_routes().with_state(members_state));

    Router::new().nest("/orgs", orgs)
}
