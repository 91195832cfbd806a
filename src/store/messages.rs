//! Message mutations. Posting a message also joins the author to the
//! room's participant set.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    AppError, AppResult,
    models::{Message, User},
    store::search,
};

pub async fn get_message(db_pool: &SqlitePool, message_id: &str) -> AppResult<Message> {
    sqlx::query_as("SELECT uuid, room_id, user_id, body, created FROM messages WHERE uuid = ?")
        .bind(message_id)
        .fetch_optional(db_pool)
        .await?
        .ok_or(AppError::NotFound("message"))
}

pub async fn post_message(
    db_pool: &SqlitePool,
    acting: &User,
    room_id: &str,
    body: &str,
) -> AppResult<Message> {
    if body.is_empty() {
        return Err(AppError::Validation("message body is required".to_owned()));
    }

    // the room must be live at creation time
    search::get_room(db_pool, room_id).await?;

    let uuid = Uuid::now_v7().to_string();
    sqlx::query("INSERT INTO messages (uuid, room_id, user_id, body) VALUES (?, ?, ?, ?)")
        .bind(&uuid)
        .bind(room_id)
        .bind(&acting.uuid)
        .bind(body)
        .execute(db_pool)
        .await?;

    // set semantics: re-posting never duplicates the membership row
    sqlx::query("INSERT OR IGNORE INTO participants (room_id, user_id) VALUES (?, ?)")
        .bind(room_id)
        .bind(&acting.uuid)
        .execute(db_pool)
        .await?;

    get_message(db_pool, &uuid).await
}

/// Author only.
pub async fn delete_message(
    db_pool: &SqlitePool,
    acting: &User,
    message_id: &str,
) -> AppResult<()> {
    let message = get_message(db_pool, message_id).await?;
    if message.user_id != acting.uuid {
        return Err(AppError::PermissionDenied);
    }

    sqlx::query("DELETE FROM messages WHERE uuid = ?")
        .bind(message_id)
        .execute(db_pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::search::{room_messages, room_participants};
    use crate::store::testutil::{seed_pool, seed_room, seed_user};

    #[tokio::test]
    async fn posting_joins_the_participant_set_once() {
        let db_pool = seed_pool().await;
        let host = seed_user(&db_pool, "u1").await;
        let guest = seed_user(&db_pool, "u2").await;
        let room = seed_room(&db_pool, &host, "Lounge", "General", "").await;

        post_message(&db_pool, &guest, &room.uuid, "hi").await.unwrap();
        post_message(&db_pool, &guest, &room.uuid, "hi again").await.unwrap();

        let participants = room_participants(&db_pool, &room.uuid).await.unwrap();
        assert_eq!(participants.len(), 1);
        assert_eq!(participants[0].uuid, guest.uuid);

        assert_eq!(room_messages(&db_pool, &room.uuid).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn posting_to_a_missing_room_is_not_found() {
        let db_pool = seed_pool().await;
        let user = seed_user(&db_pool, "u1").await;

        let err = post_message(&db_pool, &user, "missing", "hi").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("room")));
    }

    #[tokio::test]
    async fn empty_body_is_rejected() {
        let db_pool = seed_pool().await;
        let host = seed_user(&db_pool, "u1").await;
        let room = seed_room(&db_pool, &host, "Lounge", "General", "").await;

        let err = post_message(&db_pool, &host, &room.uuid, "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn only_the_author_may_delete() {
        let db_pool = seed_pool().await;
        let host = seed_user(&db_pool, "u1").await;
        let guest = seed_user(&db_pool, "u2").await;
        let room = seed_room(&db_pool, &host, "Lounge", "General", "").await;

        let message = post_message(&db_pool, &guest, &room.uuid, "mine").await.unwrap();

        let err = delete_message(&db_pool, &host, &message.uuid).await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));

        delete_message(&db_pool, &guest, &message.uuid).await.unwrap();
        assert!(matches!(
            get_message(&db_pool, &message.uuid).await.unwrap_err(),
            AppError::NotFound("message")
        ));

        // deleting the message does not retract room membership
        assert_eq!(room_participants(&db_pool, &room.uuid).await.unwrap().len(), 1);
    }
}
