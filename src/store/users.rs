//! Registration, credential checks and profile updates. Usernames and
//! emails are normalized to lowercase before they are stored or matched.

use bcrypt::{DEFAULT_COST, hash, verify};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{AppError, AppResult, models::User};

pub struct Registration {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// A partial profile update; `None` fields keep their current value.
#[derive(Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

pub async fn find_user(db_pool: &SqlitePool, user_id: &str) -> AppResult<Option<User>> {
    Ok(sqlx::query_as(
        "SELECT uuid, name, username, email, password_hash, bio, avatar, created
         FROM users WHERE uuid = ?",
    )
    .bind(user_id)
    .fetch_optional(db_pool)
    .await?)
}

pub async fn register(db_pool: &SqlitePool, registration: Registration) -> AppResult<User> {
    let username = registration.username.to_lowercase();
    let email = registration.email.to_lowercase();

    if username.is_empty() || email.is_empty() || registration.password.is_empty() {
        return Err(AppError::Validation(
            "username, email and password are required".to_owned(),
        ));
    }

    let taken: Option<(i64,)> =
        sqlx::query_as("SELECT 1 FROM users WHERE username = ? OR email = ?")
            .bind(&username)
            .bind(&email)
            .fetch_optional(db_pool)
            .await?;
    if taken.is_some() {
        return Err(AppError::Validation(
            "username or email is already taken".to_owned(),
        ));
    }

    let uuid = Uuid::now_v7().to_string();
    let password_hash = hash(&registration.password, DEFAULT_COST)?;

    sqlx::query(
        "INSERT INTO users (uuid, name, username, email, password_hash) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&uuid)
    .bind(&registration.name)
    .bind(&username)
    .bind(&email)
    .bind(&password_hash)
    .execute(db_pool)
    .await?;

    Ok(find_user(db_pool, &uuid).await?.expect("row just inserted"))
}

/// Checks credentials against the stored hash. An unknown email is its
/// own failure, distinct from a bad password.
pub async fn authenticate(db_pool: &SqlitePool, email: &str, password: &str) -> AppResult<User> {
    let email = email.to_lowercase();

    let user: Option<User> = sqlx::query_as(
        "SELECT uuid, name, username, email, password_hash, bio, avatar, created
         FROM users WHERE email = ?",
    )
    .bind(&email)
    .fetch_optional(db_pool)
    .await?;

    let Some(user) = user else {
        return Err(AppError::Auth("user does not exist".to_owned()));
    };

    if verify(password, &user.password_hash)? {
        Ok(user)
    } else {
        Err(AppError::Auth("email or password is invalid".to_owned()))
    }
}

/// Overwrites only the supplied fields.
pub async fn update_profile(
    db_pool: &SqlitePool,
    acting: &User,
    patch: ProfilePatch,
) -> AppResult<User> {
    let name = patch.name.unwrap_or_else(|| acting.name.clone());
    let username = patch
        .username
        .map(|u| u.to_lowercase())
        .unwrap_or_else(|| acting.username.clone());
    let email = patch
        .email
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| acting.email.clone());
    let bio = patch.bio.unwrap_or_else(|| acting.bio.clone());
    let avatar = patch.avatar.unwrap_or_else(|| acting.avatar.clone());

    if username.is_empty() || email.is_empty() {
        return Err(AppError::Validation(
            "username and email are required".to_owned(),
        ));
    }

    let taken: Option<(i64,)> = sqlx::query_as(
        "SELECT 1 FROM users WHERE (username = ? OR email = ?) AND uuid != ?",
    )
    .bind(&username)
    .bind(&email)
    .bind(&acting.uuid)
    .fetch_optional(db_pool)
    .await?;
    if taken.is_some() {
        return Err(AppError::Validation(
            "username or email is already taken".to_owned(),
        ));
    }

    sqlx::query(
        "UPDATE users SET name = ?, username = ?, email = ?, bio = ?, avatar = ? WHERE uuid = ?",
    )
    .bind(&name)
    .bind(&username)
    .bind(&email)
    .bind(&bio)
    .bind(&avatar)
    .bind(&acting.uuid)
    .execute(db_pool)
    .await?;

    Ok(find_user(db_pool, &acting.uuid)
        .await?
        .expect("acting user exists"))
}
