//! Accessors for the `cleaner_services` table.
//!
//! Service names are free text; rows are written at registration or seeding
//! and never updated or deleted afterwards.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::CleanerService;

/// Inserts one offered service for a cleaner.
pub async fn insert(
    executor: impl PgExecutor<'_>,
    cleaner_id: Uuid,
    service: &str,
) -> AppResult<()> {
    sqlx::query("INSERT INTO cleaner_services (cleaner_id, service) VALUES ($1, $2)")
        .bind(cleaner_id)
        .bind(service)
        .execute(executor)
        .await?;
    Ok(())
}

/// All (cleaner_id, service) pairs, unordered.
pub async fn list_all(pool: &PgPool) -> AppResult<Vec<CleanerService>> {
    let services =
        sqlx::query_as::<_, CleanerService>("SELECT cleaner_id, service FROM cleaner_services")
            .fetch_all(pool)
            .await?;
    Ok(services)
}

/// Service names offered by one cleaner.
pub async fn list_for_cleaner(pool: &PgPool, cleaner_id: Uuid) -> AppResult<Vec<String>> {
    let services =
        sqlx::query_scalar::<_, String>("SELECT service FROM cleaner_services WHERE cleaner_id = $1")
            .bind(cleaner_id)
            .fetch_all(pool)
            .await?;
    Ok(services)
}
