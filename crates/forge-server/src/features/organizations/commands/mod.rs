pub mod create;

pub use create::{CreateOrganizationCommand, CreateOrganizationError, CreateOrganizationResponse};
