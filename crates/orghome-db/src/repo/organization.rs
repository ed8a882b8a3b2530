//! Organization repository - organizations and their teams.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orghome_core::ResourceId;
use orghome_core::organization::{OrgVisibility, Organization, Team};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{DbError, DbResult};

/// Database row for organizations.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrganizationRow {
    pub id: Uuid,
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub visibility: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<OrganizationRow> for Organization {
    type Error = DbError;

    fn try_from(row: OrganizationRow) -> Result<Self, Self::Error> {
        let visibility: OrgVisibility = row
            .visibility
            .parse()
            .map_err(|e: String| DbError::InvalidData(e))?;

        Ok(Organization {
            id: ResourceId::from_uuid(row.id),
            name: row.name,
            full_name: row.full_name,
            description: row.description,
            visibility,
            created_at: row.created_at,
        })
    }
}

/// Database row for teams, with their member count.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TeamRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub member_count: i64,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Team {
            id: ResourceId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            member_count: row.member_count,
        }
    }
}

#[async_trait]
pub trait OrganizationRepo: Send + Sync {
    /// Look up an organization by its URL name (case-insensitive).
    async fn get_by_name(&self, name: &str) -> DbResult<Organization>;
    async fn list_teams(&self, org_id: ResourceId) -> DbResult<Vec<Team>>;
}

/// PostgreSQL implementation of OrganizationRepo.
pub struct PgOrganizationRepo {
    pool: PgPool,
}

impl PgOrganizationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganizationRepo for PgOrganizationRepo {
    async fn get_by_name(&self, name: &str) -> DbResult<Organization> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            "SELECT * FROM organizations WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("organization {}", name)))?;
        row.try_into()
    }

    async fn list_teams(&self, org_id: ResourceId) -> DbResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT t.id, t.name, t.description, COUNT(tm.user_id) AS member_count
            FROM teams t
            LEFT JOIN team_members tm ON tm.team_id = t.id
            WHERE t.organization_id = $1
            GROUP BY t.id, t.name, t.description
            ORDER BY t.name
            "#,
        )
        .bind(org_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Team::from).collect())
    }
}
