//! In-memory collaborators for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use orghome_config::SiteConfig;
use orghome_core::membership::{FindMembersOptions, Member};
use orghome_core::organization::{OrgVisibility, Organization, Team, Viewer};
use orghome_core::relationship::RelationshipKind;
use orghome_core::repository::{RepositorySummary, SearchRepoOptions};
use orghome_core::sort::SearchOrder;
use orghome_core::{Error, ResourceId};
use orghome_db::{
    DbError, DbResult, MembershipRepo, OrganizationRepo, RelationshipRepo, RepositoryRepo,
    UserRepo,
};
use tokio::sync::Barrier;

use crate::AppState;
use crate::services::markup::{MarkupRenderer, PlainTextRenderer};

pub fn org(name: &str) -> Organization {
    Organization {
        id: ResourceId::new(),
        name: name.to_string(),
        full_name: String::new(),
        description: String::new(),
        visibility: OrgVisibility::Public,
        created_at: Utc::now(),
    }
}

pub fn viewer(name: &str, is_admin: bool) -> Viewer {
    Viewer {
        id: ResourceId::new(),
        name: name.to_string(),
        is_admin,
    }
}

/// A public repository owned by `owner`, updated `age_minutes` ago.
pub fn repo(owner: &Organization, name: &str, stars: i64, age_minutes: i64) -> RepositorySummary {
    let at = Utc::now() - Duration::minutes(age_minutes);
    RepositorySummary {
        id: ResourceId::new(),
        owner_id: owner.id,
        name: name.to_string(),
        description: String::new(),
        language: None,
        is_private: false,
        is_mirror: false,
        num_stars: stars,
        num_forks: 0,
        created_at: at,
        updated_at: at,
    }
}

fn injected() -> DbError {
    DbError::Database(sqlx::Error::PoolTimedOut)
}

/// Every collaborator backed by plain vectors, with switches to make a
/// single call fail.
#[derive(Default)]
pub struct MockStore {
    pub orgs: Vec<Organization>,
    pub teams: Vec<(ResourceId, Team)>,
    pub members: Vec<(ResourceId, Member)>,
    pub repos: Vec<RepositorySummary>,
    pub watches: Vec<(ResourceId, ResourceId)>,
    pub stars: Vec<(ResourceId, ResourceId)>,
    pub sessions: Vec<(String, Viewer)>,
    pub fail_org_lookup: bool,
    pub fail_teams: bool,
    pub fail_membership_check: bool,
    pub fail_list_members: bool,
    pub fail_count_members: bool,
    pub fail_search: bool,
    pub fail_watch: bool,
    pub fail_star: bool,
    pub fail_session: bool,
    calls: Mutex<Vec<&'static str>>,
    candidates: Mutex<Vec<(RelationshipKind, Vec<ResourceId>)>>,
}

impl MockStore {
    pub fn add_member(&mut self, org: &Organization, viewer: &Viewer, is_public: bool) {
        self.members.push((
            org.id,
            Member {
                user_id: viewer.id,
                name: viewer.name.clone(),
                avatar_url: None,
                is_public,
            },
        ));
    }

    /// Names of the collaborator calls made so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Candidate ids passed to each relationship lookup.
    pub fn relationship_candidates(&self) -> Vec<(RelationshipKind, Vec<ResourceId>)> {
        self.candidates.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn scoped_members(&self, opts: &FindMembersOptions) -> Vec<Member> {
        self.members
            .iter()
            .filter(|(org_id, m)| {
                *org_id == opts.org_id && (!opts.visibility.is_public_only() || m.is_public)
            })
            .map(|(_, m)| m.clone())
            .collect()
    }
}

#[async_trait]
impl OrganizationRepo for MockStore {
    async fn get_by_name(&self, name: &str) -> DbResult<Organization> {
        self.record("get_by_name");
        if self.fail_org_lookup {
            return Err(injected());
        }
        self.orgs
            .iter()
            .find(|o| o.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| DbError::NotFound(format!("organization {}", name)))
    }

    async fn list_teams(&self, org_id: ResourceId) -> DbResult<Vec<Team>> {
        self.record("list_teams");
        if self.fail_teams {
            return Err(injected());
        }
        Ok(self
            .teams
            .iter()
            .filter(|(id, _)| *id == org_id)
            .map(|(_, t)| t.clone())
            .collect())
    }
}

#[async_trait]
impl MembershipRepo for MockStore {
    async fn is_member(&self, org_id: ResourceId, user_id: ResourceId) -> DbResult<bool> {
        self.record("is_member");
        if self.fail_membership_check {
            return Err(injected());
        }
        Ok(self
            .members
            .iter()
            .any(|(o, m)| *o == org_id && m.user_id == user_id))
    }

    async fn list_members(&self, opts: &FindMembersOptions) -> DbResult<Vec<Member>> {
        self.record("list_members");
        if self.fail_list_members {
            return Err(injected());
        }
        Ok(self
            .scoped_members(opts)
            .into_iter()
            .skip(opts.list.offset() as usize)
            .take(opts.list.limit() as usize)
            .collect())
    }

    async fn count_members(&self, opts: &FindMembersOptions) -> DbResult<i64> {
        self.record("count_members");
        if self.fail_count_members {
            return Err(injected());
        }
        Ok(self.scoped_members(opts).len() as i64)
    }
}

#[async_trait]
impl RepositoryRepo for MockStore {
    async fn search(&self, opts: &SearchRepoOptions) -> DbResult<(Vec<RepositorySummary>, i64)> {
        self.record("search");
        if self.fail_search {
            return Err(injected());
        }

        let keyword = opts.keyword.to_lowercase();
        let mut matches: Vec<RepositorySummary> = self
            .repos
            .iter()
            .filter(|r| r.owner_id == opts.owner_id)
            .filter(|r| !r.is_private || opts.include_private)
            .filter(|r| {
                keyword.is_empty()
                    || r.name.to_lowercase().contains(&keyword)
                    || (opts.include_description
                        && r.description.to_lowercase().contains(&keyword))
            })
            .filter(|r| {
                opts.language.is_empty()
                    || r.language
                        .as_deref()
                        .is_some_and(|l| l.eq_ignore_ascii_case(&opts.language))
            })
            .cloned()
            .collect();

        matches.sort_by(|a, b| match opts.order {
            SearchOrder::Newest => b.created_at.cmp(&a.created_at),
            SearchOrder::Oldest => a.created_at.cmp(&b.created_at),
            SearchOrder::RecentUpdated => b.updated_at.cmp(&a.updated_at),
            SearchOrder::LeastUpdated => a.updated_at.cmp(&b.updated_at),
            SearchOrder::Alphabetically => a.name.cmp(&b.name),
            SearchOrder::AlphabeticallyReverse => b.name.cmp(&a.name),
            SearchOrder::StarsReverse => b.num_stars.cmp(&a.num_stars),
            SearchOrder::Stars => a.num_stars.cmp(&b.num_stars),
            SearchOrder::ForksReverse => b.num_forks.cmp(&a.num_forks),
            SearchOrder::Forks => a.num_forks.cmp(&b.num_forks),
        });

        let total = matches.len() as i64;
        let page = matches
            .into_iter()
            .skip(opts.list.offset() as usize)
            .take(opts.list.limit() as usize)
            .collect();
        Ok((page, total))
    }
}

#[async_trait]
impl RelationshipRepo for MockStore {
    async fn filter_by_relationship(
        &self,
        kind: RelationshipKind,
        user_id: ResourceId,
        candidates: &[ResourceId],
    ) -> DbResult<Vec<ResourceId>> {
        self.candidates
            .lock()
            .unwrap()
            .push((kind, candidates.to_vec()));

        let (failing, pairs) = match kind {
            RelationshipKind::Watch => (self.fail_watch, &self.watches),
            RelationshipKind::Star => (self.fail_star, &self.stars),
        };
        if failing {
            return Err(injected());
        }
        Ok(pairs
            .iter()
            .filter(|(user, repo)| *user == user_id && candidates.contains(repo))
            .map(|(_, repo)| *repo)
            .collect())
    }
}

#[async_trait]
impl UserRepo for MockStore {
    async fn get_viewer_by_session(&self, token_hash: &str) -> DbResult<Option<Viewer>> {
        if self.fail_session {
            return Err(injected());
        }
        Ok(self
            .sessions
            .iter()
            .find(|(hash, _)| hash == token_hash)
            .map(|(_, v)| v.clone()))
    }
}

/// Relationship index whose lookups block on a shared barrier, or which
/// answers with an id that was never asked for.
pub struct BarrierRelationships {
    barrier: Option<Barrier>,
    foreign: Option<ResourceId>,
}

impl BarrierRelationships {
    /// Every lookup waits until `parties` lookups are in flight, then reports
    /// all candidates as related.
    pub fn new(parties: usize) -> Self {
        Self {
            barrier: Some(Barrier::new(parties)),
            foreign: None,
        }
    }

    pub fn leaky(foreign: ResourceId) -> Self {
        Self {
            barrier: None,
            foreign: Some(foreign),
        }
    }
}

#[async_trait]
impl RelationshipRepo for BarrierRelationships {
    async fn filter_by_relationship(
        &self,
        _kind: RelationshipKind,
        _user_id: ResourceId,
        candidates: &[ResourceId],
    ) -> DbResult<Vec<ResourceId>> {
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        match self.foreign {
            Some(id) => Ok(vec![id]),
            None => Ok(candidates.to_vec()),
        }
    }
}

pub struct FailingRenderer;

impl MarkupRenderer for FailingRenderer {
    fn render_string(&self, _raw: &str) -> orghome_core::Result<String> {
        Err(Error::Render("renderer unavailable".to_string()))
    }
}

/// App state whose collaborators all share `store`.
pub fn state_with(store: Arc<MockStore>, config: SiteConfig) -> AppState {
    AppState {
        organizations: store.clone(),
        memberships: store.clone(),
        repositories: store.clone(),
        relationships: store.clone(),
        users: store,
        markup: Arc::new(PlainTextRenderer),
        config: Arc::new(config),
    }
}
