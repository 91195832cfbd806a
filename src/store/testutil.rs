//! Shared fixtures for store tests: an in-memory database plus cheap
//! seeded rows. Password hashing uses the minimum bcrypt cost to keep
//! the suite fast.

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use uuid::Uuid;

use crate::db;
use crate::models::{Room, User};
use crate::store::rooms;

pub(crate) async fn seed_pool() -> SqlitePool {
    // one connection: every handle on an in-memory database must be the
    // same handle, or the schema is invisible to its siblings
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::init(&db_pool).await.unwrap();
    db_pool
}

pub(crate) async fn seed_user(db_pool: &SqlitePool, username: &str) -> User {
    let uuid = Uuid::now_v7().to_string();
    let hash = bcrypt::hash("hunter2", 4).unwrap();

    sqlx::query("INSERT INTO users (uuid, name, username, email, password_hash) VALUES (?, ?, ?, ?, ?)")
        .bind(&uuid)
        .bind(username)
        .bind(username)
        .bind(format!("{username}@example.com"))
        .bind(&hash)
        .execute(db_pool)
        .await
        .unwrap();

    crate::store::users::find_user(db_pool, &uuid)
        .await
        .unwrap()
        .unwrap()
}

pub(crate) async fn seed_room(
    db_pool: &SqlitePool,
    host: &User,
    name: &str,
    topic: &str,
    description: &str,
) -> Room {
    rooms::create_room(db_pool, host, name, topic, description)
        .await
        .unwrap()
}
