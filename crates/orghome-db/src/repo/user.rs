//! User repository - resolving sessions to viewers.

use async_trait::async_trait;
use orghome_core::ResourceId;
use orghome_core::organization::Viewer;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbResult;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ViewerRow {
    pub id: Uuid,
    pub name: String,
    pub is_admin: bool,
}

impl From<ViewerRow> for Viewer {
    fn from(row: ViewerRow) -> Self {
        Viewer {
            id: ResourceId::from_uuid(row.id),
            name: row.name,
            is_admin: row.is_admin,
        }
    }
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// The user owning an unexpired session with this token hash, if any.
    async fn get_viewer_by_session(&self, token_hash: &str) -> DbResult<Option<Viewer>>;
}

/// PostgreSQL implementation of UserRepo.
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn get_viewer_by_session(&self, token_hash: &str) -> DbResult<Option<Viewer>> {
        let row = sqlx::query_as::<_, ViewerRow>(
            r#"
            SELECT u.id, u.name, u.is_admin
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = $1 AND s.expires_at > NOW()
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Viewer::from))
    }
}
