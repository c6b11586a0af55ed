//! Accessors for the `users` table.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{PublicUser, Role, User};

/// Fields required to create a user row. The password must already be hashed.
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub phone_number: Option<&'a str>,
    pub location: Option<&'a str>,
    pub role: Role,
}

/// Partial profile update; `None` fields keep their current value.
#[derive(Default)]
pub struct ProfileChanges<'a> {
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone_number: Option<&'a str>,
    pub location: Option<&'a str>,
}

/// Maps unique-constraint violations onto domain errors so handlers can
/// answer 400 instead of leaking a 500.
fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return match db_err.constraint() {
            Some("users_email_key") => AppError::DuplicateEmail,
            Some("users_username_key") => AppError::BadRequest("Username already taken"),
            _ => AppError::Db(e),
        };
    }
    AppError::Db(e)
}

/// Inserts a new user and returns its id.
pub async fn insert(executor: impl PgExecutor<'_>, user: &NewUser<'_>) -> AppResult<Uuid> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO users (username, email, password_hash, phone_number, location, role)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(user.username)
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.phone_number)
    .bind(user.location)
    .bind(user.role)
    .fetch_one(executor)
    .await
    .map_err(map_unique_violation)
}

/// Returns true if a user with this email already exists.
pub async fn email_exists(pool: &PgPool, email: &str) -> AppResult<bool> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Looks a user up by login identifier: the email address or phone number.
pub async fn find_by_identifier(pool: &PgPool, identifier: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE email = $1 OR phone_number = $1",
    )
    .bind(identifier)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Stamps `last_login` with the current time.
pub async fn touch_last_login(pool: &PgPool, id: Uuid) -> AppResult<()> {
    sqlx::query("UPDATE users SET last_login = now() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Applies the provided profile fields, keeping current values for the rest.
/// Returns false when no user row matched the id.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    changes: &ProfileChanges<'_>,
) -> AppResult<bool> {
    let result = sqlx::query(
        r#"
        UPDATE users SET
            username = COALESCE($2, username),
            email = COALESCE($3, email),
            phone_number = COALESCE($4, phone_number),
            location = COALESCE($5, location)
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(changes.username)
    .bind(changes.email)
    .bind(changes.phone_number)
    .bind(changes.location)
    .execute(pool)
    .await
    .map_err(map_unique_violation)?;

    Ok(result.rows_affected() > 0)
}

/// All users, public fields only, unordered.
pub async fn list_all(pool: &PgPool) -> AppResult<Vec<PublicUser>> {
    let users = sqlx::query_as::<_, PublicUser>(
        "SELECT id, username, email, phone_number, location, role FROM users",
    )
    .fetch_all(pool)
    .await?;
    Ok(users)
}

/// All users with the cleaner role, public fields only.
pub async fn list_cleaners(pool: &PgPool) -> AppResult<Vec<PublicUser>> {
    let cleaners = sqlx::query_as::<_, PublicUser>(
        "SELECT id, username, email, phone_number, location, role FROM users WHERE role = 'cleaner'",
    )
    .fetch_all(pool)
    .await?;
    Ok(cleaners)
}

/// Finds a user by id only if they hold the cleaner role.
pub async fn find_cleaner(pool: &PgPool, id: Uuid) -> AppResult<Option<PublicUser>> {
    let cleaner = sqlx::query_as::<_, PublicUser>(
        r#"
        SELECT id, username, email, phone_number, location, role
        FROM users
        WHERE id = $1 AND role = 'cleaner'
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(cleaner)
}
