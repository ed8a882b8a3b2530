//! Relationship repository - watches and stars.

use async_trait::async_trait;
use orghome_core::ResourceId;
use orghome_core::relationship::RelationshipKind;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbResult;

#[async_trait]
pub trait RelationshipRepo: Send + Sync {
    /// The subset of `candidates` that `user_id` has the `kind` relationship with.
    async fn filter_by_relationship(
        &self,
        kind: RelationshipKind,
        user_id: ResourceId,
        candidates: &[ResourceId],
    ) -> DbResult<Vec<ResourceId>>;
}

/// PostgreSQL implementation of RelationshipRepo.
pub struct PgRelationshipRepo {
    pool: PgPool,
}

impl PgRelationshipRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RelationshipRepo for PgRelationshipRepo {
    async fn filter_by_relationship(
        &self,
        kind: RelationshipKind,
        user_id: ResourceId,
        candidates: &[ResourceId],
    ) -> DbResult<Vec<ResourceId>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let sql = match kind {
            RelationshipKind::Watch => {
                "SELECT repository_id FROM watches WHERE user_id = $1 AND repository_id = ANY($2)"
            }
            RelationshipKind::Star => {
                "SELECT repository_id FROM stars WHERE user_id = $1 AND repository_id = ANY($2)"
            }
        };

        let ids: Vec<Uuid> = candidates.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<Uuid> = sqlx::query_scalar(sql)
            .bind(user_id.as_uuid())
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ResourceId::from_uuid).collect())
    }
}
