//! # Request Workflow Handlers
//!
//! The connect/assign/status workflow: a client submits a service request,
//! a cleaner is selected for it exactly once, and either participant may
//! update its status afterwards.

use std::sync::Arc;

use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::MessageResponse;
use crate::middleware::AuthUser;
use crate::models::{AppState, PublicUser};
use crate::store;

/// Request payload for submitting a service request
#[derive(Debug, Deserialize, Validate)]
pub struct ConnectRequest {
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(length(min = 1))]
    pub service: String,
}

/// Response after submitting a request: every cleaner in the system.
///
/// The list is deliberately unfiltered by location or service; the client
/// picks from the full roster. See DESIGN.md for the rationale.
#[derive(Debug, Serialize)]
pub struct ConnectResponse {
    pub message: &'static str,
    pub request_id: Uuid,
    pub available_cleaners: Vec<PublicUser>,
}

/// Request payload for assigning a cleaner to a pending request
#[derive(Debug, Deserialize)]
pub struct SelectCleanerRequest {
    pub cleaner_id: Uuid,
    pub request_id: Uuid,
}

/// Request payload for a free-text status update
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1, max = 50))]
    pub status: String,
}

/// Submits a new service request and lists available cleaners.
///
/// POST /connect_with_cleaner
///
/// Creates a `Pending` request owned by the authenticated caller and returns
/// all users with the cleaner role.
///
/// # Returns
///
/// - `201 Created` with [`ConnectResponse`]
/// - `400 Bad Request` - Empty location or service
/// - `401 Unauthorized` - Missing or invalid authentication token
/// - `500 Internal Server Error` - Database error
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn connect_with_cleaner(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ConnectRequest>,
) -> AppResult<impl IntoResponse> {
    debug!("Processing connect request");

    if payload.validate().is_err() {
        return Err(AppError::BadRequest("Invalid input"));
    }

    let request_id = store::requests::insert(
        &state.db_pool,
        user.user_id,
        &payload.location,
        &payload.service,
    )
    .await?;

    let available_cleaners = store::users::list_cleaners(&state.db_pool).await?;

    info!(
        ledger_id = %request_id,
        cleaners = available_cleaners.len(),
        "Service request submitted"
    );
    Ok((
        StatusCode::CREATED,
        Json(ConnectResponse {
            message: "Request submitted",
            request_id,
            available_cleaners,
        }),
    ))
}

/// Assigns a cleaner to a pending request.
///
/// POST /select_cleaner
///
/// The assignment is a single conditional write guarded on `cleaner_id IS
/// NULL`: the first committed assignment wins and every later attempt is
/// rejected, so a request can never be silently reassigned.
///
/// # Returns
///
/// - `200 OK` - Cleaner assigned
/// - `400 Bad Request` - Request already has a cleaner
/// - `401 Unauthorized` - Missing or invalid authentication token
/// - `404 Not Found` - Unknown cleaner or request id
/// - `500 Internal Server Error` - Database error
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn select_cleaner(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<SelectCleanerRequest>,
) -> AppResult<impl IntoResponse> {
    debug!("Processing cleaner selection");

    if store::users::find_cleaner(&state.db_pool, payload.cleaner_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Cleaner not found"));
    }

    let assigned =
        store::requests::try_assign(&state.db_pool, payload.request_id, payload.cleaner_id).await?;

    if !assigned {
        // Zero rows means the guard failed: either the request does not
        // exist or another assignment got there first.
        return match store::requests::find_by_id(&state.db_pool, payload.request_id).await? {
            None => Err(AppError::NotFound("Request not found")),
            Some(_) => {
                warn!(ledger_id = %payload.request_id, "Rejected reassignment attempt");
                Err(AppError::BadRequest("Request already assigned"))
            }
        };
    }

    info!(
        ledger_id = %payload.request_id,
        cleaner_id = %payload.cleaner_id,
        "Cleaner assigned to request"
    );
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Cleaner assigned",
        }),
    ))
}

/// Overwrites a request's status with caller-supplied text.
///
/// PUT /requests/{id}/update_status
///
/// Only the requesting client or the assigned cleaner may update a request.
/// There is no transition table; any non-empty status string is accepted.
///
/// # Returns
///
/// - `200 OK` - Status updated
/// - `400 Bad Request` - Empty or oversized status
/// - `401 Unauthorized` - Missing or invalid authentication token
/// - `403 Forbidden` - Caller is not a participant in this request
/// - `404 Not Found` - Unknown request id
/// - `500 Internal Server Error` - Database error
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        ledger_id = %id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    debug!("Processing status update");

    if payload.validate().is_err() {
        return Err(AppError::BadRequest("Invalid input"));
    }

    let request = store::requests::find_by_id(&state.db_pool, id)
        .await?
        .ok_or(AppError::NotFound("Request not found"))?;

    if !request.is_participant(user.user_id) {
        warn!("Status update rejected: caller is not a participant");
        return Err(AppError::Forbidden(
            "Only the requesting client or assigned cleaner may update this request",
        ));
    }

    store::requests::update_status(&state.db_pool, id, &payload.status).await?;

    info!(status = %payload.status, "Request status updated");
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Status updated",
        }),
    ))
}
