//! Repository traits and implementations.

pub mod membership;
pub mod organization;
pub mod relationship;
pub mod repository;
pub mod user;

pub use membership::{MembershipRepo, PgMembershipRepo};
pub use organization::{OrganizationRepo, PgOrganizationRepo};
pub use relationship::{PgRelationshipRepo, RelationshipRepo};
pub use repository::{PgRepositoryRepo, RepositoryRepo};
pub use user::{PgUserRepo, UserRepo};
