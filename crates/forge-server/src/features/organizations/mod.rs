pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateOrganizationCommand, CreateOrganizationError, CreateOrganizationResponse,
};

pub use queries::{
    GetOrganizationError, GetOrganizationQuery, GetOrganizationResponse, ListOrganizationsError,
    ListOrganizationsQuery, ListOrganizationsResponse, OrganizationListItem,
};

pub use routes::organizations_routes;
