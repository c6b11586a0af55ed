//! # CleanLink - Cleaning Service Marketplace Backend
//!
//! ## Modules
//!
//! - [`handlers`] - HTTP request handlers for various endpoints
//! - [`middleware`] - Custom middleware for authentication and other cross-cutting concerns
//! - [`services`] - Business logic services (JWT, password hashing)
//! - [`store`] - Repository-style database accessors
//! - [`utils`] - Utility functions and constants

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

use std::env;
use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use jsonwebtoken::{DecodingKey, EncodingKey};
use sqlx::PgPool;

use crate::handlers::{
    connect_with_cleaner, get_profile, health_check, list_cleaner_services, list_users, login,
    register, seed_database, select_cleaner, update_profile, update_status,
};
use crate::middleware::auth_middleware;
use crate::models::AppState;
use crate::services::jwt::JwtService;

/// Creates the Axum router with application routes and state.
///
/// # Arguments
///
/// * `db_pool` - PostgreSQL database connection pool
///
/// # Environment Variables
///
/// - `JWT_SECRET` - Required for JWT token signing and validation
///
/// # Returns
///
/// A configured Axum router with all application routes and middleware
pub fn app(db_pool: PgPool) -> Router {
    let jwt_keys = env::var("JWT_SECRET")
        .expect("Env variable `JWT_SECRET` should be set")
        .into_bytes();

    let jwt_service = JwtService::new(
        EncodingKey::from_secret(&jwt_keys),
        DecodingKey::from_secret(&jwt_keys),
    );

    let state = Arc::new(AppState::new(db_pool, jwt_service));

    let protected_routes = Router::new()
        .route("/profile", get(get_profile))
        .route("/update_profile", put(update_profile))
        .route("/connect_with_cleaner", post(connect_with_cleaner))
        .route("/select_cleaner", post(select_cleaner))
        .route("/requests/{id}/update_status", put(update_status))
        .route_layer(from_fn_with_state(Arc::clone(&state), auth_middleware));

    let public_routes = Router::new()
        .route("/health-check", get(health_check))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/users", get(list_users))
        .route("/cleaner_services", get(list_cleaner_services))
        .route("/seed", post(seed_database));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
