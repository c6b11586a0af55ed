//! # Seed Handler
//!
//! Development-only endpoint that drops and recreates all tables, then
//! inserts a fixed set of demo accounts. Destructive; never expose this
//! route in a production deployment.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::{info, instrument, warn};

use crate::error::AppResult;
use crate::handlers::MessageResponse;
use crate::models::{AppState, Role};
use crate::services::password::hash_password;
use crate::store;
use crate::store::users::NewUser;

const SCHEMA_SQL: &str = include_str!("../../migrations/0001_create_marketplace_tables.sql");

const DROP_SQL: &str = "
DROP TABLE IF EXISTS cleaner_requests, cleaner_services, users CASCADE;
DROP TYPE IF EXISTS user_role;
";

/// Shared password for all demo accounts.
const DEMO_PASSWORD: &str = "cleanlink-demo";

struct DemoAccount {
    username: &'static str,
    email: &'static str,
    phone_number: &'static str,
    location: &'static str,
    role: Role,
    services: &'static [&'static str],
}

const DEMO_ACCOUNTS: &[DemoAccount] = &[
    DemoAccount {
        username: "amina",
        email: "amina@cleanlink.dev",
        phone_number: "+254700000101",
        location: "Kenya",
        role: Role::Cleaner,
        services: &["General House Cleaning", "Laundry Service"],
    },
    DemoAccount {
        username: "joseph",
        email: "joseph@cleanlink.dev",
        phone_number: "+254700000102",
        location: "Kenya",
        role: Role::Cleaner,
        services: &["House Cleaning with Laundry"],
    },
    DemoAccount {
        username: "wanjiku",
        email: "wanjiku@cleanlink.dev",
        phone_number: "+254700000103",
        location: "Kenya",
        role: Role::Client,
        services: &[],
    },
];

/// Drops and recreates all tables, then inserts fixed demo data.
///
/// POST /seed
///
/// Existing data is destroyed. The demo set is two cleaners with services,
/// one client, and one pending request from that client, so every endpoint
/// has something to show immediately after seeding.
///
/// # Returns
///
/// - `200 OK` - Database recreated and seeded
/// - `500 Internal Server Error` - DDL or insert failure
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn seed_database(State(state): State<Arc<AppState>>) -> AppResult<impl IntoResponse> {
    warn!("Re-seeding database: all existing data will be dropped");

    sqlx::raw_sql(DROP_SQL).execute(&state.db_pool).await?;
    sqlx::raw_sql(SCHEMA_SQL).execute(&state.db_pool).await?;

    let password_hash = hash_password(DEMO_PASSWORD)?;

    let mut tx = state.db_pool.begin().await?;

    let mut client_id = None;
    for account in DEMO_ACCOUNTS {
        let user_id = store::users::insert(
            &mut *tx,
            &NewUser {
                username: account.username,
                email: account.email,
                password_hash: &password_hash,
                phone_number: Some(account.phone_number),
                location: Some(account.location),
                role: account.role,
            },
        )
        .await?;

        for service in account.services {
            store::services::insert(&mut *tx, user_id, service).await?;
        }

        if account.role == Role::Client {
            client_id = Some(user_id);
        }
    }

    if let Some(client_id) = client_id {
        store::requests::insert(&mut *tx, client_id, "Kenya", "Laundry Service").await?;
    }

    tx.commit().await?;

    info!(accounts = DEMO_ACCOUNTS.len(), "Database seeded with demo data");
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Database seeded",
        }),
    ))
}
