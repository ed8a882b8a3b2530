//! PostgreSQL access for the organization home page.
//!
//! Each data source the page reads (organizations, memberships, repository
//! search, watch/star relationships, sessions) is a trait in [`repo`] with a
//! `Pg*` implementation over a shared [`PgPool`].

pub mod error;
pub mod repo;

pub use error::{DbError, DbResult};
pub use repo::*;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Open a pool of at most `max_connections` connections to `database_url`.
pub async fn create_pool(database_url: &str, max_connections: u32) -> DbResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> DbResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
