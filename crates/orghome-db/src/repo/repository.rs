//! Repository repository - searching an owner's repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orghome_core::ResourceId;
use orghome_core::repository::{RepositorySummary, SearchRepoOptions};
use orghome_core::sort::SearchOrder;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::DbResult;

/// Database row for repositories.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RepositoryRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub language: Option<String>,
    pub is_private: bool,
    pub is_mirror: bool,
    pub num_stars: i64,
    pub num_forks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RepositoryRow> for RepositorySummary {
    fn from(row: RepositoryRow) -> Self {
        RepositorySummary {
            id: ResourceId::from_uuid(row.id),
            owner_id: ResourceId::from_uuid(row.owner_id),
            name: row.name,
            description: row.description,
            language: row.language,
            is_private: row.is_private,
            is_mirror: row.is_mirror,
            num_stars: row.num_stars,
            num_forks: row.num_forks,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
pub trait RepositoryRepo: Send + Sync {
    /// One page of repositories matching `opts`, plus the total number of matches.
    async fn search(&self, opts: &SearchRepoOptions) -> DbResult<(Vec<RepositorySummary>, i64)>;
}

/// PostgreSQL implementation of RepositoryRepo.
pub struct PgRepositoryRepo {
    pool: PgPool,
}

impl PgRepositoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RepositoryRepo for PgRepositoryRepo {
    async fn search(&self, opts: &SearchRepoOptions) -> DbResult<(Vec<RepositorySummary>, i64)> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM repositories r");
        push_filters(&mut count_query, opts);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT r.* FROM repositories r");
        push_filters(&mut query, opts);
        query.push(" ORDER BY ");
        query.push(order_clause(opts.order));
        query.push(" LIMIT ");
        query.push_bind(opts.list.limit());
        query.push(" OFFSET ");
        query.push_bind(opts.list.offset());

        let rows: Vec<RepositoryRow> = query.build_query_as().fetch_all(&self.pool).await?;
        Ok((rows.into_iter().map(RepositorySummary::from).collect(), total))
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, opts: &SearchRepoOptions) {
    query.push(" WHERE r.owner_id = ");
    query.push_bind(*opts.owner_id.as_uuid());

    // Private repositories need a signed-in admin or a member of the owner.
    match (&opts.actor, opts.include_private) {
        (Some(actor), true) if actor.is_admin => {}
        (Some(actor), true) => {
            query.push(" AND (r.is_private = FALSE OR EXISTS (SELECT 1 FROM org_members m WHERE m.organization_id = r.owner_id AND m.user_id = ");
            query.push_bind(*actor.id.as_uuid());
            query.push("))");
        }
        _ => {
            query.push(" AND r.is_private = FALSE");
        }
    }

    if !opts.keyword.is_empty() {
        let pattern = format!("%{}%", escape_like(&opts.keyword));
        query.push(" AND (r.name ILIKE ");
        query.push_bind(pattern.clone());
        if opts.include_description {
            query.push(" OR r.description ILIKE ");
            query.push_bind(pattern);
        }
        query.push(")");
    }

    if !opts.language.is_empty() {
        query.push(" AND LOWER(r.language) = LOWER(");
        query.push_bind(opts.language.clone());
        query.push(")");
    }
}

/// Every order ends on `r.id` so equal keys page deterministically.
fn order_clause(order: SearchOrder) -> &'static str {
    match order {
        SearchOrder::Newest => "r.created_at DESC, r.id DESC",
        SearchOrder::Oldest => "r.created_at ASC, r.id ASC",
        SearchOrder::RecentUpdated => "r.updated_at DESC, r.id DESC",
        SearchOrder::LeastUpdated => "r.updated_at ASC, r.id ASC",
        SearchOrder::Alphabetically => "LOWER(r.name) ASC, r.id ASC",
        SearchOrder::AlphabeticallyReverse => "LOWER(r.name) DESC, r.id DESC",
        SearchOrder::StarsReverse => "r.num_stars DESC, r.updated_at DESC, r.id DESC",
        SearchOrder::Stars => "r.num_stars ASC, r.updated_at DESC, r.id DESC",
        SearchOrder::ForksReverse => "r.num_forks DESC, r.updated_at DESC, r.id DESC",
        SearchOrder::Forks => "r.num_forks ASC, r.updated_at DESC, r.id DESC",
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
