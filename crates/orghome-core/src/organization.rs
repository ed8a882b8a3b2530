//! Organizations, teams and the requesting viewer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ResourceId;

/// Who may see an organization at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgVisibility {
    #[default]
    Public,
    /// Visible to any signed-in user.
    Limited,
    /// Visible to members and site administrators only.
    Private,
}

impl std::fmt::Display for OrgVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrgVisibility::Public => write!(f, "public"),
            OrgVisibility::Limited => write!(f, "limited"),
            OrgVisibility::Private => write!(f, "private"),
        }
    }
}

impl std::str::FromStr for OrgVisibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(OrgVisibility::Public),
            "limited" => Ok(OrgVisibility::Limited),
            "private" => Ok(OrgVisibility::Private),
            _ => Err(format!("Unknown organization visibility: {}", s)),
        }
    }
}

/// An organization owning repositories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: ResourceId,
    /// URL name, e.g. `acme` in `/acme/`.
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub visibility: OrgVisibility,
    pub created_at: DateTime<Utc>,
}

impl Organization {
    /// Full name when set, otherwise the URL name.
    pub fn display_name(&self) -> &str {
        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            &self.name
        } else {
            full_name
        }
    }

    /// Whether `viewer` may see this organization, given their membership.
    pub fn is_visible_to(&self, viewer: Option<&Viewer>, is_member: bool) -> bool {
        match self.visibility {
            OrgVisibility::Public => true,
            OrgVisibility::Limited => viewer.is_some(),
            OrgVisibility::Private => viewer.is_some_and(|v| v.is_admin || is_member),
        }
    }
}

/// A team inside an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: ResourceId,
    pub name: String,
    pub description: String,
    pub member_count: i64,
}

/// The signed-in user making the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewer {
    pub id: ResourceId,
    pub name: String,
    pub is_admin: bool,
}
