//! Application state.

use orghome_config::SiteConfig;
use orghome_db::{
    MembershipRepo, OrganizationRepo, PgMembershipRepo, PgOrganizationRepo, PgRelationshipRepo,
    PgRepositoryRepo, PgUserRepo, RelationshipRepo, RepositoryRepo, UserRepo,
};
use sqlx::PgPool;
use std::sync::Arc;

use crate::services::markup::{MarkupRenderer, PlainTextRenderer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub organizations: Arc<dyn OrganizationRepo>,
    pub memberships: Arc<dyn MembershipRepo>,
    pub repositories: Arc<dyn RepositoryRepo>,
    pub relationships: Arc<dyn RelationshipRepo>,
    pub users: Arc<dyn UserRepo>,
    pub markup: Arc<dyn MarkupRenderer>,
    /// Read-only snapshot taken at startup.
    pub config: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(pool: PgPool, config: SiteConfig) -> Self {
        Self {
            organizations: Arc::new(PgOrganizationRepo::new(pool.clone())),
            memberships: Arc::new(PgMembershipRepo::new(pool.clone())),
            repositories: Arc::new(PgRepositoryRepo::new(pool.clone())),
            relationships: Arc::new(PgRelationshipRepo::new(pool.clone())),
            users: Arc::new(PgUserRepo::new(pool)),
            markup: Arc::new(PlainTextRenderer),
            config: Arc::new(config),
        }
    }
}
