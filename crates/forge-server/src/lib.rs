//! Forge Server Library
//!
//! HTTP API service for organization-membership management in the Forge
//! Git-hosting platform.
//!
//! # Overview
//!
//! The server exposes a REST API for organizations and their memberships:
//!
//! - **API Endpoints**: organization reads/creation and membership
//!   management (listing, membership checks, visibility, removal)
//! - **Database Management**: PostgreSQL integration with SQLx
//! - **Configuration**: environment-based configuration management
//! - **Middleware**: CORS, request logging, and requester-context resolution
//!
//! # Architecture
//!
//! The server follows a **CQRS (Command Query Responsibility Segregation)**
//! architecture:
//!
//! - **Commands** (write operations): create organization, publicize or
//!   conceal a membership, remove a member. Executed via HTTP POST, PUT,
//!   and DELETE.
//! - **Queries** (read operations): get/list organizations, list members,
//!   membership checks. Executed via HTTP GET.
//!
//! Authentication lives upstream; the requester's identity arrives in the
//! `x-user-id` header and is resolved to a [`middleware::auth::Requester`]
//! before any handler runs. Each handler is an authorization predicate over
//! the requester's and target's relationship to the organization, a call
//! into the persistence layer, and a status mapping.
//!
//! ## Framework Stack
//!
//! - **Axum**: web framework
//! - **SQLx**: PostgreSQL driver and migrations
//! - **Tower**: middleware and service abstractions
//!
//! # Example
//!
//! ```no_run
//! use forge_server::{api, config::Config, db};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     api::serve(config, pool).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod cqrs;
pub mod db;
pub mod features;
pub mod middleware;
