//! # User Types
//!
//! This module defines the user row types and the Role enum that corresponds
//! to the PostgreSQL `user_role` enum type. Using a Rust enum instead of text
//! conversion provides better performance and compile-time type safety.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Represents the two kinds of account in the marketplace.
///
/// This enum corresponds directly to the PostgreSQL `user_role` enum type
/// defined in the database migrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A user requesting cleaning services
    Client,
    /// A user offering cleaning services
    Cleaner,
}

impl Role {
    /// Parses a role from its wire representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "client" => Some(Role::Client),
            "cleaner" => Some(Role::Cleaner),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role_str = match self {
            Role::Client => "client",
            Role::Cleaner => "cleaner",
        };
        write!(f, "{role_str}")
    }
}

/// Full user record as stored in the `users` table.
///
/// Never serialized directly; the password hash must not leave the process.
/// Use [`PublicUser`] for anything that goes over the wire.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub role: Role,
    pub date_created: OffsetDateTime,
    pub last_login: Option<OffsetDateTime>,
}

/// Public projection of a user, safe to return from listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub role: Role,
}

/// One service offered by a cleaner. Free-text name, many per cleaner.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CleanerService {
    pub cleaner_id: Uuid,
    pub service: String,
}
