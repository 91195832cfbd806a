use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use crate::AppResult;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        uuid TEXT PRIMARY KEY,
        name TEXT NOT NULL DEFAULT '',
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        bio TEXT NOT NULL DEFAULT '',
        avatar TEXT NOT NULL DEFAULT '/avatar.svg',
        created TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS topics (
        uuid TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )",
    "CREATE TABLE IF NOT EXISTS rooms (
        uuid TEXT PRIMARY KEY,
        host_id TEXT NOT NULL REFERENCES users(uuid),
        topic_id TEXT NOT NULL REFERENCES topics(uuid),
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        created TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
    // unique: room_id, user_id
    "CREATE TABLE IF NOT EXISTS participants (
        room_id TEXT NOT NULL REFERENCES rooms(uuid),
        user_id TEXT NOT NULL REFERENCES users(uuid),
        PRIMARY KEY (room_id, user_id)
    )",
    "CREATE TABLE IF NOT EXISTS messages (
        uuid TEXT PRIMARY KEY,
        room_id TEXT NOT NULL REFERENCES rooms(uuid),
        user_id TEXT NOT NULL REFERENCES users(uuid),
        body TEXT NOT NULL,
        created TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
];

pub async fn connect(url: &str) -> AppResult<SqlitePool> {
    let db_pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect(url)
        .await?;

    init(&db_pool).await?;

    Ok(db_pool)
}

/// Bootstraps the schema; safe to run on an existing database.
pub async fn init(db_pool: &SqlitePool) -> AppResult<()> {
    for stmt in SCHEMA {
        sqlx::query(stmt).execute(db_pool).await?;
    }

    Ok(())
}
