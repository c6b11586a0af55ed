//! # Profile Handlers
//!
//! Authenticated profile retrieval and partial update. The profile response
//! is role-dependent: clients see assigned requests in their location with
//! the cleaner resolved, cleaners see their catalog and the requests
//! currently assigned to them.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::MessageResponse;
use crate::middleware::AuthUser;
use crate::models::{AppState, CleanerRequestView, ClientRequestView, Role};
use crate::store;
use crate::store::users::ProfileChanges;
use crate::utils::validator::{EMAIL_REGEX, PHONE_REGEX};

/// Profile response for a client account
#[derive(Debug, Serialize, Deserialize)]
pub struct ClientProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub role: Role,
    /// Assigned requests in the client's location, cleaner name resolved.
    pub assigned_requests: Vec<ClientRequestView>,
}

/// Profile response for a cleaner account
#[derive(Debug, Serialize, Deserialize)]
pub struct CleanerProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub role: Role,
    /// Service names this cleaner offers.
    pub services: Vec<String>,
    /// Requests currently assigned to this cleaner.
    pub assigned_requests: Vec<CleanerRequestView>,
}

/// Request payload for partial profile updates; absent fields are unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 150))]
    pub username: Option<String>,
    #[validate(regex(path = "*EMAIL_REGEX"))]
    pub email: Option<String>,
    #[validate(regex(path = "*PHONE_REGEX"))]
    pub phone_number: Option<String>,
    pub location: Option<String>,
}

/// Gets the authenticated user's profile information.
///
/// GET /profile
///
/// # Returns
///
/// - `200 OK` with [`ClientProfile`] or [`CleanerProfile`] by role
/// - `401 Unauthorized` - Missing or invalid authentication token
/// - `404 Not Found` - User record no longer exists
/// - `500 Internal Server Error` - Database error
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Response> {
    debug!("Processing profile request");

    let record = store::users::find_by_id(&state.db_pool, user.user_id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    match record.role {
        Role::Client => {
            let assigned_requests = match record.location.as_deref() {
                Some(location) => {
                    store::requests::assigned_in_location(&state.db_pool, location).await?
                }
                None => Vec::new(),
            };

            info!("Client profile retrieved");
            Ok((
                StatusCode::OK,
                Json(ClientProfile {
                    id: record.id,
                    username: record.username,
                    email: record.email,
                    phone_number: record.phone_number,
                    location: record.location,
                    role: record.role,
                    assigned_requests,
                }),
            )
                .into_response())
        }
        Role::Cleaner => {
            let services = store::services::list_for_cleaner(&state.db_pool, record.id).await?;
            let assigned_requests =
                store::requests::assigned_to_cleaner(&state.db_pool, record.id).await?;

            info!("Cleaner profile retrieved");
            Ok((
                StatusCode::OK,
                Json(CleanerProfile {
                    id: record.id,
                    username: record.username,
                    email: record.email,
                    phone_number: record.phone_number,
                    location: record.location,
                    role: record.role,
                    services,
                    assigned_requests,
                }),
            )
                .into_response())
        }
    }
}

/// Applies a partial update to the authenticated user's profile.
///
/// PUT /update_profile
///
/// Only the fields present in the request are written; the update is a single
/// statement, so a constraint violation rolls the whole change back.
///
/// # Returns
///
/// - `200 OK` - Profile updated
/// - `400 Bad Request` - Invalid field value or duplicate email/username
/// - `401 Unauthorized` - Missing or invalid authentication token
/// - `404 Not Found` - User record no longer exists
/// - `500 Internal Server Error` - Database error
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    debug!("Processing profile update request");

    if payload.validate().is_err() {
        return Err(AppError::BadRequest("Invalid input"));
    }

    let changes = ProfileChanges {
        username: payload.username.as_deref(),
        email: payload.email.as_deref(),
        phone_number: payload.phone_number.as_deref(),
        location: payload.location.as_deref(),
    };

    let updated = store::users::update_profile(&state.db_pool, user.user_id, &changes).await?;
    if !updated {
        return Err(AppError::NotFound("User not found"));
    }

    info!("Profile updated");
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Profile updated",
        }),
    ))
}
