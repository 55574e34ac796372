pub mod check_membership;
pub mod check_public_membership;
pub mod list_members;

pub use check_membership::{CheckMembershipError, CheckMembershipQuery, CheckMembershipResponse};
pub use check_public_membership::{
    CheckPublicMembershipError, CheckPublicMembershipQuery, CheckPublicMembershipResponse,
};
pub use list_members::{ListMembersError, ListMembersQuery, ListMembersResponse, MemberSummary};
