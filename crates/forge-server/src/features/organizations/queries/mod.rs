pub mod get;
pub mod list;

pub use get::{GetOrganizationError, GetOrganizationQuery, GetOrganizationResponse};
pub use list::{
    ListOrganizationsError, ListOrganizationsQuery, ListOrganizationsResponse,
    OrganizationListItem,
};
