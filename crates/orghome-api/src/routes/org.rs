//! Organization home page: `GET /{org}/`.

use askama::Template;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use axum::routing::get;

use crate::AppState;
use crate::auth::CurrentViewer;
use crate::error::ApiError;
use crate::services::enrichment::{Enrichment, enrich};
use crate::services::visibility::{is_org_member, member_visibility};
use orghome_core::membership::{FindMembersOptions, Member, MembershipView};
use orghome_core::organization::{Organization, Team, Viewer};
use orghome_core::pagination::{ListOptions, Pagination};
use orghome_core::relationship::RelationshipSet;
use orghome_core::repository::{RepositoryPage, SearchRepoOptions};
use orghome_core::sort::SortKey;
use orghome_db::DbError;

/// Name suffixes served by other handlers (public key and GPG key listings).
const RESERVED_SUFFIXES: [&str; 2] = [".keys", ".gpg"];

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{org}", get(org_home_page))
        .route("/{org}/", get(org_home_page))
}

/// Query parameters of the home page. All are optional and lenient.
#[derive(Debug, Default)]
pub struct OrgHomeQuery {
    pub sort: Option<String>,
    pub q: Option<String>,
    pub language: Option<String>,
    pub page: Option<String>,
}

impl OrgHomeQuery {
    /// Collect the known keys from raw query pairs. A repeated key keeps its
    /// first value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "sort" => &mut query.sort,
                "q" => &mut query.q,
                "language" => &mut query.language,
                "page" => &mut query.page,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    /// Requested page; missing, malformed or non-positive values become 1.
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
            .max(1)
    }
}

/// Everything the home page shows, assembled for one request.
#[derive(Debug)]
pub struct OrgHomePage {
    pub organization: Organization,
    pub title: String,
    pub rendered_description: Option<String>,
    pub sort_type: SortKey,
    pub keyword: String,
    pub language: String,
    pub repositories: RepositoryPage,
    pub members: MembershipView,
    pub teams: Vec<Team>,
    pub pagination: Pagination,
    pub watched: RelationshipSet,
    pub starred: RelationshipSet,
    pub disable_new_pull_mirrors: bool,
    pub viewer: Option<Viewer>,
}

async fn org_home_page(
    State(state): State<AppState>,
    Path(org): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
    CurrentViewer(viewer): CurrentViewer,
) -> Result<impl IntoResponse, ApiError> {
    let query = OrgHomeQuery::from_pairs(pairs);
    let page = assemble_org_home(&state, &org, &query, viewer).await?;
    let template = OrgHomeTemplate::from(page);

    match template.render() {
        Ok(html) => Ok(Html(html)),
        Err(e) => Err(ApiError::server_error("Org home template render", e)),
    }
}

/// Build the home page of `org_name` as seen by `viewer`.
pub async fn assemble_org_home(
    state: &AppState,
    org_name: &str,
    query: &OrgHomeQuery,
    viewer: Option<Viewer>,
) -> Result<OrgHomePage, ApiError> {
    if RESERVED_SUFFIXES
        .iter()
        .any(|suffix| org_name.ends_with(suffix))
    {
        return Err(ApiError::NotFound(format!("organization {}", org_name)));
    }

    let organization = match state.organizations.get_by_name(org_name).await {
        Ok(organization) => organization,
        Err(DbError::NotFound(_)) => {
            return Err(ApiError::NotFound(format!("organization {}", org_name)));
        }
        Err(e) => return Err(ApiError::server_error("GetOrganizationByName", e)),
    };
    let is_member = is_org_member(state.memberships.as_ref(), &organization, viewer.as_ref())
        .await
        .map_err(|e| ApiError::server_error("IsOrgMember", e))?;

    // Hidden organizations look exactly like missing ones.
    if !organization.is_visible_to(viewer.as_ref(), is_member) {
        return Err(ApiError::NotFound(format!("organization {}", org_name)));
    }

    let can_see_teams = is_member || viewer.as_ref().is_some_and(|v| v.is_admin);
    let teams = if can_see_teams {
        state
            .organizations
            .list_teams(organization.id)
            .await
            .map_err(|e| ApiError::server_error("ListTeams", e))?
    } else {
        Vec::new()
    };

    let rendered_description = if organization.description.is_empty() {
        None
    } else {
        let html = state
            .markup
            .render_string(&organization.description)
            .map_err(|e| ApiError::server_error("RenderString", e))?;
        Some(html)
    };

    let sort_type = SortKey::from_query(query.sort.as_deref().unwrap_or_default());
    let keyword = query.q.as_deref().unwrap_or_default().trim().to_string();
    let language = query.language.as_deref().unwrap_or_default().trim().to_string();
    let list = ListOptions::new(query.page(), state.config.ui.repo_paging_num);

    let search = SearchRepoOptions {
        list,
        owner_id: organization.id,
        keyword: keyword.clone(),
        language: language.clone(),
        order: sort_type.order(),
        include_private: viewer.is_some(),
        actor: viewer.clone(),
        include_description: state.config.ui.search_repo_description,
    };
    let (repositories, total) = state
        .repositories
        .search(&search)
        .await
        .map_err(|e| ApiError::server_error("SearchRepository", e))?;
    let repositories = RepositoryPage {
        repositories,
        total,
        page: list.page,
    };

    let member_opts = FindMembersOptions {
        org_id: organization.id,
        visibility: member_visibility(viewer.as_ref(), is_member),
        list: ListOptions::new(1, state.config.ui.members_paging_num),
    };
    let members = state
        .memberships
        .list_members(&member_opts)
        .await
        .map_err(|e| ApiError::server_error("FindOrgMembers", e))?;
    let members_total = state
        .memberships
        .count_members(&member_opts)
        .await
        .map_err(|e| ApiError::server_error("CountOrgMembers", e))?;

    let Enrichment { watched, starred } = match &viewer {
        Some(v) => enrich(state.relationships.as_ref(), v.id, &repositories.ids()).await,
        None => Enrichment::default(),
    };

    let mut pagination = Pagination::new(
        total,
        state.config.ui.repo_paging_num,
        list.page,
        state.config.ui.pagination_window,
    );
    pagination.add_param("sort", sort_type.as_str());
    pagination.add_param("q", &keyword);
    pagination.add_param("language", &language);

    Ok(OrgHomePage {
        title: organization.display_name().to_string(),
        organization,
        rendered_description,
        sort_type,
        keyword,
        language,
        repositories,
        members: MembershipView {
            members,
            total: members_total,
            visibility: member_opts.visibility,
        },
        teams,
        pagination,
        watched,
        starred,
        disable_new_pull_mirrors: state.config.mirror.disable_new_pull,
        viewer,
    })
}

// ============================================================================
// Template
// ============================================================================

#[derive(Template)]
#[template(path = "org/home.html")]
struct OrgHomeTemplate {
    title: String,
    org_name: String,
    rendered_description: Option<String>,
    sort_type: String,
    keyword: String,
    language: String,
    repos: Vec<RepoView>,
    total: i64,
    members: Vec<Member>,
    members_total: i64,
    teams: Vec<Team>,
    page_links: Vec<PageLinkView>,
    prev_link: Option<String>,
    next_link: Option<String>,
    signed_in: bool,
    disable_new_pull_mirrors: bool,
}

struct RepoView {
    name: String,
    description: String,
    language: String,
    is_private: bool,
    is_mirror: bool,
    num_stars: i64,
    num_forks: i64,
    updated_ago: String,
    is_watched: bool,
    is_starred: bool,
}

struct PageLinkView {
    number: i64,
    href: String,
    is_current: bool,
}

impl From<OrgHomePage> for OrgHomeTemplate {
    fn from(page: OrgHomePage) -> Self {
        let repos = page
            .repositories
            .repositories
            .into_iter()
            .map(|r| RepoView {
                is_watched: page.watched.contains(&r.id),
                is_starred: page.starred.contains(&r.id),
                updated_ago: format_time_ago(r.updated_at),
                name: r.name,
                description: r.description,
                language: r.language.unwrap_or_default(),
                is_private: r.is_private,
                is_mirror: r.is_mirror,
                num_stars: r.num_stars,
                num_forks: r.num_forks,
            })
            .collect();

        let pagination = &page.pagination;
        let page_links = pagination
            .pages()
            .into_iter()
            .map(|l| PageLinkView {
                href: pagination.link(l.number),
                number: l.number,
                is_current: l.is_current,
            })
            .collect();
        let prev_link = pagination
            .has_previous()
            .then(|| pagination.link(pagination.previous()));
        let next_link = pagination
            .has_next()
            .then(|| pagination.link(pagination.next()));

        Self {
            title: page.title,
            org_name: page.organization.name,
            rendered_description: page.rendered_description,
            sort_type: page.sort_type.as_str().to_string(),
            keyword: page.keyword,
            language: page.language,
            repos,
            total: page.repositories.total,
            members: page.members.members,
            members_total: page.members.total,
            teams: page.teams,
            page_links,
            prev_link,
            next_link,
            signed_in: page.viewer.is_some(),
            disable_new_pull_mirrors: page.disable_new_pull_mirrors,
        }
    }
}

fn format_time_ago(time: chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let duration = now.signed_duration_since(time);

    if duration.num_minutes() < 1 {
        "just now".to_string()
    } else if duration.num_hours() < 1 {
        format!("{}m ago", duration.num_minutes())
    } else if duration.num_days() < 1 {
        format!("{}h ago", duration.num_hours())
    } else {
        format!("{}d ago", duration.num_days())
    }
}
