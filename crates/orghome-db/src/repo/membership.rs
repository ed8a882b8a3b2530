//! Membership repository - who belongs to an organization.

use async_trait::async_trait;
use orghome_core::ResourceId;
use orghome_core::membership::{FindMembersOptions, Member};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbResult;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberRow {
    pub user_id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
    pub is_public: bool,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            user_id: ResourceId::from_uuid(row.user_id),
            name: row.name,
            avatar_url: row.avatar_url,
            is_public: row.is_public,
        }
    }
}

#[async_trait]
pub trait MembershipRepo: Send + Sync {
    async fn is_member(&self, org_id: ResourceId, user_id: ResourceId) -> DbResult<bool>;
    /// One page of members within the visibility scope of `opts`.
    async fn list_members(&self, opts: &FindMembersOptions) -> DbResult<Vec<Member>>;
    /// All members within the visibility scope of `opts`, ignoring paging.
    async fn count_members(&self, opts: &FindMembersOptions) -> DbResult<i64>;
}

/// PostgreSQL implementation of MembershipRepo.
pub struct PgMembershipRepo {
    pool: PgPool,
}

impl PgMembershipRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepo for PgMembershipRepo {
    async fn is_member(&self, org_id: ResourceId, user_id: ResourceId) -> DbResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM org_members WHERE organization_id = $1 AND user_id = $2)",
        )
        .bind(org_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn list_members(&self, opts: &FindMembersOptions) -> DbResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT u.id AS user_id, u.name, u.avatar_url, m.is_public
            FROM org_members m
            JOIN users u ON u.id = m.user_id
            WHERE m.organization_id = $1 AND ($2 = FALSE OR m.is_public = TRUE)
            ORDER BY u.name
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(opts.org_id.as_uuid())
        .bind(opts.visibility.is_public_only())
        .bind(opts.list.limit())
        .bind(opts.list.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn count_members(&self, opts: &FindMembersOptions) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM org_members m
            WHERE m.organization_id = $1 AND ($2 = FALSE OR m.is_public = TRUE)
            "#,
        )
        .bind(opts.org_id.as_uuid())
        .bind(opts.visibility.is_public_only())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
