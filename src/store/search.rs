//! Read-side queries: room search, topic listings, the activity feed and
//! the profile read-model. Search is case-insensitive substring matching;
//! an empty query matches everything.

use sqlx::SqlitePool;

use crate::{
    AppError, AppResult,
    models::{MessageView, Profile, Room, RoomView, TopicCount, User},
};

const ROOM_VIEW: &str = "SELECT r.uuid, r.host_id, u.username AS host_username, t.name AS topic_name,
            r.name, r.description, r.created
     FROM rooms r
     JOIN users u ON u.uuid = r.host_id
     JOIN topics t ON t.uuid = r.topic_id";

const MESSAGE_VIEW: &str = "SELECT m.uuid, m.room_id, r.name AS room_name, m.user_id, u.username, m.body, m.created
     FROM messages m
     JOIN rooms r ON r.uuid = m.room_id
     JOIN users u ON u.uuid = m.user_id";

/// Wraps a query in `%..%` for LIKE, escaping wildcards so they match
/// literally.
fn like_pattern(q: &str) -> String {
    let escaped = q
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Rooms whose topic name, room name or description contains `q`,
/// in insertion order.
pub async fn list_rooms(db_pool: &SqlitePool, q: &str) -> AppResult<Vec<RoomView>> {
    let sql = format!(
        "{ROOM_VIEW}
         WHERE t.name LIKE ?1 ESCAPE '\\'
            OR r.name LIKE ?1 ESCAPE '\\'
            OR r.description LIKE ?1 ESCAPE '\\'
         ORDER BY r.rowid"
    );

    Ok(sqlx::query_as(&sql)
        .bind(like_pattern(q))
        .fetch_all(db_pool)
        .await?)
}

pub async fn get_room(db_pool: &SqlitePool, room_id: &str) -> AppResult<Room> {
    sqlx::query_as("SELECT uuid, host_id, topic_id, name, description, created, updated FROM rooms WHERE uuid = ?")
        .bind(room_id)
        .fetch_optional(db_pool)
        .await?
        .ok_or(AppError::NotFound("room"))
}

pub async fn get_room_view(db_pool: &SqlitePool, room_id: &str) -> AppResult<RoomView> {
    let sql = format!("{ROOM_VIEW} WHERE r.uuid = ?");

    sqlx::query_as(&sql)
        .bind(room_id)
        .fetch_optional(db_pool)
        .await?
        .ok_or(AppError::NotFound("room"))
}

/// All rooms, unfiltered, for the JSON layer.
pub async fn all_rooms(db_pool: &SqlitePool) -> AppResult<Vec<Room>> {
    Ok(sqlx::query_as(
        "SELECT uuid, host_id, topic_id, name, description, created, updated FROM rooms ORDER BY rowid",
    )
    .fetch_all(db_pool)
    .await?)
}

/// Topics matching `q` with their room counts. `limit` of `None` means all
/// of them (the topics page); the home sidebar passes 5.
pub async fn list_topics(
    db_pool: &SqlitePool,
    q: &str,
    limit: Option<u32>,
) -> AppResult<Vec<TopicCount>> {
    Ok(sqlx::query_as(
        "SELECT t.uuid, t.name, COUNT(r.uuid) AS room_count
         FROM topics t
         LEFT JOIN rooms r ON r.topic_id = t.uuid
         WHERE t.name LIKE ?1 ESCAPE '\\'
         GROUP BY t.uuid, t.name
         ORDER BY t.rowid
         LIMIT ?2",
    )
    .bind(like_pattern(q))
    .bind(limit.map(i64::from).unwrap_or(-1))
    .fetch_all(db_pool)
    .await?)
}

/// The five most recent messages across all rooms whose topic name
/// contains `q`.
pub async fn recent_activity(db_pool: &SqlitePool, q: &str) -> AppResult<Vec<MessageView>> {
    let sql = format!(
        "{MESSAGE_VIEW}
         JOIN topics t ON t.uuid = r.topic_id
         WHERE t.name LIKE ?1 ESCAPE '\\'
         ORDER BY m.created DESC, m.rowid DESC
         LIMIT 5"
    );

    Ok(sqlx::query_as(&sql)
        .bind(like_pattern(q))
        .fetch_all(db_pool)
        .await?)
}

/// A room's messages, most recent first.
pub async fn room_messages(db_pool: &SqlitePool, room_id: &str) -> AppResult<Vec<MessageView>> {
    let sql = format!("{MESSAGE_VIEW} WHERE m.room_id = ? ORDER BY m.created DESC, m.rowid DESC");

    Ok(sqlx::query_as(&sql).bind(room_id).fetch_all(db_pool).await?)
}

pub async fn room_participants(db_pool: &SqlitePool, room_id: &str) -> AppResult<Vec<User>> {
    Ok(sqlx::query_as(
        "SELECT u.uuid, u.name, u.username, u.email, u.password_hash, u.bio, u.avatar, u.created
         FROM users u
         JOIN participants p ON p.user_id = u.uuid
         WHERE p.room_id = ?
         ORDER BY p.rowid",
    )
    .bind(room_id)
    .fetch_all(db_pool)
    .await?)
}

pub async fn participant_ids(db_pool: &SqlitePool, room_id: &str) -> AppResult<Vec<String>> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT user_id FROM participants WHERE room_id = ? ORDER BY rowid")
            .bind(room_id)
            .fetch_all(db_pool)
            .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// The profile page read-model: the user, the rooms they host, the
/// messages they wrote, and the full topic list.
pub async fn user_profile(db_pool: &SqlitePool, user_id: &str) -> AppResult<Profile> {
    let user = crate::store::users::find_user(db_pool, user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    let rooms_sql = format!("{ROOM_VIEW} WHERE r.host_id = ? ORDER BY r.rowid");
    let rooms = sqlx::query_as(&rooms_sql)
        .bind(user_id)
        .fetch_all(db_pool)
        .await?;

    let messages_sql =
        format!("{MESSAGE_VIEW} WHERE m.user_id = ? ORDER BY m.created DESC, m.rowid DESC");
    let messages = sqlx::query_as(&messages_sql)
        .bind(user_id)
        .fetch_all(db_pool)
        .await?;

    let topics = list_topics(db_pool, "", None).await?;

    Ok(Profile {
        user,
        rooms,
        messages,
        topics,
    })
}
