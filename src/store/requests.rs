//! Accessors for the `cleaner_requests` table.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    CleanerRequest, CleanerRequestView, ClientRequestView, STATUS_ASSIGNED, STATUS_PENDING,
};

/// Creates a pending request for a client and returns its id.
pub async fn insert(
    executor: impl PgExecutor<'_>,
    client_id: Uuid,
    location: &str,
    service: &str,
) -> AppResult<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO cleaner_requests (client_id, location, service, status)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(client_id)
    .bind(location)
    .bind(service)
    .bind(STATUS_PENDING)
    .fetch_one(executor)
    .await?;
    Ok(id)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> AppResult<Option<CleanerRequest>> {
    let request = sqlx::query_as::<_, CleanerRequest>(
        "SELECT id, client_id, location, service, status, cleaner_id FROM cleaner_requests WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(request)
}

/// Assigns a cleaner to a request if and only if no cleaner is set yet.
///
/// The guard lives in the WHERE clause, so concurrent attempts race on the
/// row inside Postgres: the first committed write wins and every later
/// attempt sees zero affected rows. Returns true when the assignment took.
pub async fn try_assign(
    executor: impl PgExecutor<'_>,
    request_id: Uuid,
    cleaner_id: Uuid,
) -> AppResult<bool> {
    let result = sqlx::query(
        r#"
        UPDATE cleaner_requests
        SET cleaner_id = $2, status = $3
        WHERE id = $1 AND cleaner_id IS NULL
        "#,
    )
    .bind(request_id)
    .bind(cleaner_id)
    .bind(STATUS_ASSIGNED)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Overwrites the request status with caller-supplied text. No transition
/// table; authorization happens in the handler.
pub async fn update_status(
    executor: impl PgExecutor<'_>,
    request_id: Uuid,
    status: &str,
) -> AppResult<()> {
    sqlx::query("UPDATE cleaner_requests SET status = $2 WHERE id = $1")
        .bind(request_id)
        .bind(status)
        .execute(executor)
        .await?;
    Ok(())
}

/// Assigned requests in a location, with the cleaner's name resolved.
/// Matches by location rather than request ownership; see DESIGN.md.
pub async fn assigned_in_location(
    pool: &PgPool,
    location: &str,
) -> AppResult<Vec<ClientRequestView>> {
    let views = sqlx::query_as::<_, ClientRequestView>(
        r#"
        SELECT r.id AS request_id, r.location, r.service, r.status, u.username AS cleaner_name
        FROM cleaner_requests r
        JOIN users u ON u.id = r.cleaner_id
        WHERE r.status = $1 AND r.location = $2
        "#,
    )
    .bind(STATUS_ASSIGNED)
    .bind(location)
    .fetch_all(pool)
    .await?;
    Ok(views)
}

/// Requests currently assigned to a cleaner, with the client's name resolved.
pub async fn assigned_to_cleaner(
    pool: &PgPool,
    cleaner_id: Uuid,
) -> AppResult<Vec<CleanerRequestView>> {
    let views = sqlx::query_as::<_, CleanerRequestView>(
        r#"
        SELECT r.id AS request_id, r.location, r.service, r.status, c.username AS client_name
        FROM cleaner_requests r
        LEFT JOIN users c ON c.id = r.client_id
        WHERE r.cleaner_id = $1
        "#,
    )
    .bind(cleaner_id)
    .fetch_all(pool)
    .await?;
    Ok(views)
}
