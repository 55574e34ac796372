pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    ConcealMembershipCommand, ConcealMembershipError, ConcealMembershipResponse,
    PublicizeMembershipCommand, PublicizeMembershipError, PublicizeMembershipResponse,
    RemoveMemberCommand, RemoveMemberError, RemoveMemberResponse,
};

pub use queries::{
    CheckMembershipError, CheckMembershipQuery, CheckMembershipResponse,
    CheckPublicMembershipError, CheckPublicMembershipQuery, CheckPublicMembershipResponse,
    ListMembersError, ListMembersQuery, ListMembersResponse, MemberSummary,
};

pub use routes::{members_routes, MembersState};
