//! Who gets to see private members of an organization.

use orghome_core::membership::MemberVisibility;
use orghome_core::organization::{Organization, Viewer};
use orghome_db::{DbResult, MembershipRepo};

/// Whether `viewer` belongs to `org`. Anonymous viewers are never members and
/// cause no lookup. Lookup failures are returned to the caller.
pub async fn is_org_member(
    memberships: &dyn MembershipRepo,
    org: &Organization,
    viewer: Option<&Viewer>,
) -> DbResult<bool> {
    match viewer {
        Some(viewer) => memberships.is_member(org.id, viewer.id).await,
        None => Ok(false),
    }
}

/// Members and site administrators see the full roster; everyone else sees
/// public members only.
pub fn member_visibility(viewer: Option<&Viewer>, is_member: bool) -> MemberVisibility {
    match viewer {
        Some(viewer) if is_member || viewer.is_admin => MemberVisibility::All,
        _ => MemberVisibility::PublicOnly,
    }
}
