//! Room mutations. Every operation takes the acting user explicitly;
//! ownership is checked here, not in the handlers.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    AppError, AppResult,
    models::{Room, Topic, User},
    store::search,
};

/// Idempotent get-or-create by topic name. The existing row wins; the
/// UNIQUE constraint on `name` is the backstop under concurrent creates.
pub async fn upsert_topic(db_pool: &SqlitePool, name: &str) -> AppResult<Topic> {
    if name.is_empty() {
        return Err(AppError::Validation("topic name is required".to_owned()));
    }

    sqlx::query("INSERT INTO topics (uuid, name) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
        .bind(Uuid::now_v7().to_string())
        .bind(name)
        .execute(db_pool)
        .await?;

    Ok(sqlx::query_as("SELECT uuid, name FROM topics WHERE name = ?")
        .bind(name)
        .fetch_one(db_pool)
        .await?)
}

pub async fn create_room(
    db_pool: &SqlitePool,
    acting: &User,
    name: &str,
    topic_name: &str,
    description: &str,
) -> AppResult<Room> {
    if name.is_empty() {
        return Err(AppError::Validation("room name is required".to_owned()));
    }

    let topic = upsert_topic(db_pool, topic_name).await?;

    let uuid = Uuid::now_v7().to_string();
    sqlx::query("INSERT INTO rooms (uuid, host_id, topic_id, name, description) VALUES (?, ?, ?, ?, ?)")
        .bind(&uuid)
        .bind(&acting.uuid)
        .bind(&topic.uuid)
        .bind(name)
        .bind(description)
        .execute(db_pool)
        .await?;

    search::get_room(db_pool, &uuid).await
}

/// Full overwrite of name, topic and description; host only.
pub async fn update_room(
    db_pool: &SqlitePool,
    acting: &User,
    room_id: &str,
    name: &str,
    topic_name: &str,
    description: &str,
) -> AppResult<Room> {
    let room = search::get_room(db_pool, room_id).await?;
    if room.host_id != acting.uuid {
        return Err(AppError::PermissionDenied);
    }

    if name.is_empty() {
        return Err(AppError::Validation("room name is required".to_owned()));
    }

    let topic = upsert_topic(db_pool, topic_name).await?;

    sqlx::query(
        "UPDATE rooms SET name = ?, topic_id = ?, description = ?, updated = CURRENT_TIMESTAMP
         WHERE uuid = ?",
    )
    .bind(name)
    .bind(&topic.uuid)
    .bind(description)
    .bind(room_id)
    .execute(db_pool)
    .await?;

    search::get_room(db_pool, room_id).await
}

/// Removes the room, its messages and its participant rows in one
/// transaction; host only.
pub async fn delete_room(db_pool: &SqlitePool, acting: &User, room_id: &str) -> AppResult<()> {
    let room = search::get_room(db_pool, room_id).await?;
    if room.host_id != acting.uuid {
        return Err(AppError::PermissionDenied);
    }

    let mut tx = db_pool.begin().await?;

    sqlx::query("DELETE FROM messages WHERE room_id = ?")
        .bind(room_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM participants WHERE room_id = ?")
        .bind(room_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM rooms WHERE uuid = ?")
        .bind(room_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::messages;
    use crate::store::search::{list_rooms, recent_activity, room_participants};
    use crate::store::testutil::{seed_pool, seed_room, seed_user};

    #[tokio::test]
    async fn upsert_topic_is_idempotent() {
        let db_pool = seed_pool().await;

        let first = upsert_topic(&db_pool, "Python").await.unwrap();
        let second = upsert_topic(&db_pool, "Python").await.unwrap();
        assert_eq!(first.uuid, second.uuid);

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM topics")
            .fetch_one(&db_pool)
            .await
            .unwrap();
        assert_eq!(count, 1);

        // stored name stays case-sensitive
        let other = upsert_topic(&db_pool, "python").await.unwrap();
        assert_ne!(other.uuid, first.uuid);
    }

    #[tokio::test]
    async fn create_room_round_trips_exact_fields() {
        let db_pool = seed_pool().await;
        let host = seed_user(&db_pool, "u1").await;

        let created = create_room(&db_pool, &host, "Python Study", "Python", "weekly")
            .await
            .unwrap();

        let room = search::get_room(&db_pool, &created.uuid).await.unwrap();
        assert_eq!(room.name, "Python Study");
        assert_eq!(room.description, "weekly");
        assert_eq!(room.host_id, host.uuid);

        let topic: Topic = sqlx::query_as("SELECT uuid, name FROM topics WHERE uuid = ?")
            .bind(&room.topic_id)
            .fetch_one(&db_pool)
            .await
            .unwrap();
        assert_eq!(topic.name, "Python");

        // second room on the same topic reuses the row
        let again = create_room(&db_pool, &host, "More Python", "Python", "")
            .await
            .unwrap();
        assert_eq!(again.topic_id, room.topic_id);
    }

    #[tokio::test]
    async fn create_room_requires_name_and_topic() {
        let db_pool = seed_pool().await;
        let host = seed_user(&db_pool, "u1").await;

        let err = create_room(&db_pool, &host, "", "Python", "")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = create_room(&db_pool, &host, "Room", "", "")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_room_by_non_host_is_denied_and_unchanged() {
        let db_pool = seed_pool().await;
        let host = seed_user(&db_pool, "u1").await;
        let intruder = seed_user(&db_pool, "u2").await;

        let room = seed_room(&db_pool, &host, "Python Study", "Python", "weekly").await;

        let err = update_room(&db_pool, &intruder, &room.uuid, "Mine now", "Rust", "")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));

        let unchanged = search::get_room(&db_pool, &room.uuid).await.unwrap();
        assert_eq!(unchanged.name, "Python Study");
        assert_eq!(unchanged.description, "weekly");
        assert_eq!(unchanged.topic_id, room.topic_id);
    }

    #[tokio::test]
    async fn update_room_overwrites_all_three_fields() {
        let db_pool = seed_pool().await;
        let host = seed_user(&db_pool, "u1").await;

        let room = seed_room(&db_pool, &host, "Python Study", "Python", "weekly").await;
        let updated = update_room(&db_pool, &host, &room.uuid, "Rust Study", "Rust", "daily")
            .await
            .unwrap();

        assert_eq!(updated.name, "Rust Study");
        assert_eq!(updated.description, "daily");
        assert_ne!(updated.topic_id, room.topic_id);
    }

    #[tokio::test]
    async fn delete_room_cascades_to_messages_and_participants() {
        let db_pool = seed_pool().await;
        let host = seed_user(&db_pool, "u1").await;
        let guest = seed_user(&db_pool, "u2").await;

        let room = seed_room(&db_pool, &host, "Python Study", "Python", "").await;
        messages::post_message(&db_pool, &guest, &room.uuid, "hi")
            .await
            .unwrap();
        assert_eq!(room_participants(&db_pool, &room.uuid).await.unwrap().len(), 1);

        let err = delete_room(&db_pool, &guest, &room.uuid).await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));

        delete_room(&db_pool, &host, &room.uuid).await.unwrap();

        assert!(matches!(
            search::get_room(&db_pool, &room.uuid).await.unwrap_err(),
            AppError::NotFound("room")
        ));
        assert!(list_rooms(&db_pool, "").await.unwrap().is_empty());
        assert!(recent_activity(&db_pool, "").await.unwrap().is_empty());

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM participants")
            .fetch_one(&db_pool)
            .await
            .unwrap();
        assert_eq!(count, 0);

        // the topic survives the room
        let (topics,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM topics")
            .fetch_one(&db_pool)
            .await
            .unwrap();
        assert_eq!(topics, 1);
    }
}
