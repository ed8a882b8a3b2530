//! Organization membership listings.

use serde::{Deserialize, Serialize};

use crate::ResourceId;
use crate::pagination::ListOptions;

/// Which members a listing includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberVisibility {
    /// Only members who made their membership public.
    #[default]
    PublicOnly,
    All,
}

impl MemberVisibility {
    pub fn is_public_only(&self) -> bool {
        matches!(self, MemberVisibility::PublicOnly)
    }
}

/// Options shared by member listing and counting so both see the same scope.
#[derive(Debug, Clone, Copy)]
pub struct FindMembersOptions {
    pub org_id: ResourceId,
    pub visibility: MemberVisibility,
    pub list: ListOptions,
}

/// A member as shown in the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub user_id: ResourceId,
    pub name: String,
    pub avatar_url: Option<String>,
    pub is_public: bool,
}

/// A bounded page of members plus the total within the same scope.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipView {
    pub members: Vec<Member>,
    pub total: i64,
    pub visibility: MemberVisibility,
}
