//! # Listing Handlers
//!
//! Unauthenticated read-only listings of users and the service catalog.
//! No pagination; the data set is expected to stay small.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::{debug, instrument};

use crate::error::AppResult;
use crate::models::{AppState, CleanerService, PublicUser};
use crate::store;

/// Lists all users with their public fields.
///
/// GET /users
///
/// # Returns
///
/// - `200 OK` with the full user list (password hashes never included)
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn list_users(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<PublicUser>>> {
    debug!("Listing all users");
    let users = store::users::list_all(&state.db_pool).await?;
    Ok(Json(users))
}

/// Lists every (cleaner, service) pair in the catalog.
///
/// GET /cleaner_services
///
/// # Returns
///
/// - `200 OK` with all catalog rows, unordered
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn list_cleaner_services(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<CleanerService>>> {
    debug!("Listing service catalog");
    let services = store::services::list_all(&state.db_pool).await?;
    Ok(Json(services))
}
