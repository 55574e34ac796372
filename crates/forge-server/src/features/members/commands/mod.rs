pub mod conceal;
pub mod publicize;
pub mod remove;

pub use conceal::{ConcealMembershipCommand, ConcealMembershipError, ConcealMembershipResponse};
pub use publicize::{
    PublicizeMembershipCommand, PublicizeMembershipError, PublicizeMembershipResponse,
};
pub use remove::{RemoveMemberCommand, RemoveMemberError, RemoveMemberResponse};
