//! # Authentication Handlers
//!
//! This module implements HTTP handlers for user registration and login.
//! Registration persists a user with an Argon2id password hash and, for
//! cleaners, their offered services; login accepts an email address or phone
//! number as the identifier and issues a one-hour JWT bearer token.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{AppState, Role};
use crate::services::password::{hash_password, verify_password};
use crate::store;
use crate::store::users::NewUser;
use crate::utils::constant::MIN_PASSWORD_LENGTH;
use crate::utils::validator::{EMAIL_REGEX, PHONE_REGEX};

/// Request payload for user registration.
///
/// Required fields are Options so a missing field surfaces as a 400 with a
/// field-specific message instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub country: Option<String>,
    pub phone_number: Option<String>,
    /// Comma-separated service names, honored only for cleaners.
    pub services: Option<String>,
}

/// Response after a successful registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user_id: Uuid,
}

/// Request payload for login; identifier is an email address or phone number
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub identifier: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response containing the JWT bearer token after successful authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

fn require<'a>(field: &'a Option<String>, missing: &'static str) -> AppResult<&'a str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(AppError::BadRequest(missing))
}

/// Registers a new client or cleaner account.
///
/// POST /register
///
/// The password is stored only as an Argon2id hash. When the role is cleaner
/// and `services` is present, one catalog row is written per comma-separated,
/// trimmed service name. User and services are committed in one transaction.
///
/// # Returns
///
/// - `201 Created` - Account created
/// - `400 Bad Request` - Missing/invalid field or duplicate email
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    debug!("Processing registration request");

    let username = require(&payload.username, "Missing required field: username")?;
    let email = require(&payload.email, "Missing required field: email")?;
    let password = require(&payload.password, "Missing required field: password")?;
    let role = require(&payload.role, "Missing required field: role")?;
    let location = require(&payload.country, "Missing required field: country")?;

    let role = Role::parse(role).ok_or(AppError::BadRequest("Role must be 'client' or 'cleaner'"))?;

    if !EMAIL_REGEX.is_match(email) {
        warn!("Invalid email format provided");
        return Err(AppError::BadRequest("Invalid email address"));
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest("Password must be at least 8 characters"));
    }
    if let Some(phone) = payload.phone_number.as_deref()
        && !PHONE_REGEX.is_match(phone)
    {
        return Err(AppError::BadRequest("Invalid phone number"));
    }

    if store::users::email_exists(&state.db_pool, email).await? {
        warn!("Registration attempted with an existing email");
        return Err(AppError::DuplicateEmail);
    }

    let password_hash = hash_password(password)?;

    let mut tx = state.db_pool.begin().await?;

    let user_id = store::users::insert(
        &mut *tx,
        &NewUser {
            username,
            email,
            password_hash: &password_hash,
            phone_number: payload.phone_number.as_deref(),
            location: Some(location),
            role,
        },
    )
    .await?;

    if role == Role::Cleaner
        && let Some(services) = payload.services.as_deref()
    {
        for service in services.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            store::services::insert(&mut *tx, user_id, service).await?;
        }
    }

    tx.commit().await?;

    info!(user_id = %user_id, %role, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful",
            user_id,
        }),
    ))
}

/// Authenticates a user and issues a bearer token.
///
/// POST /login
///
/// The identifier matches either the email address or the phone number.
/// On success `last_login` is stamped and a one-hour access token returned.
/// All failure modes collapse into the same 401 to avoid leaking which
/// identifiers exist.
///
/// # Returns
///
/// - `200 OK` with LoginResponse - Authentication succeeded
/// - `400 Bad Request` - Empty identifier or password
/// - `401 Unauthorized` - Unknown identifier or wrong password
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    debug!("Processing login request");

    if payload.validate().is_err() {
        return Err(AppError::BadRequest("Invalid input"));
    }

    let Some(user) = store::users::find_by_identifier(&state.db_pool, &payload.identifier).await?
    else {
        warn!("Login attempted with unknown identifier");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(&payload.password, &user.password_hash) {
        warn!(user_id = %user.id, "Password verification failed");
        return Err(AppError::InvalidCredentials);
    }

    store::users::touch_last_login(&state.db_pool, user.id).await?;

    let access = state.jwt_service.create_access_token(user.id)?;

    info!(user_id = %user.id, "Login successful");
    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            access_token: access.token,
            token_type: "Bearer".to_string(),
            expires_in: access.expires_in,
        }),
    ))
}
