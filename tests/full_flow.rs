//! Integration test: the whole room lifecycle against one in-memory
//! database — register two users, create and find a room, enforce
//! ownership, post messages, and tear the room down.

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use studyhall::AppError;
use studyhall::db;
use studyhall::store::users::{ProfilePatch, Registration};
use studyhall::store::{messages, rooms, search, users};

async fn setup_test_db() -> anyhow::Result<SqlitePool> {
    // a single connection keeps the in-memory database shared
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    db::init(&pool).await?;
    Ok(pool)
}

fn registration(username: &str) -> Registration {
    Registration {
        name: username.to_uppercase(),
        username: username.to_owned(),
        email: format!("{username}@test.com"),
        password: "password123".to_owned(),
    }
}

#[tokio::test]
async fn test_full_room_flow() -> anyhow::Result<()> {
    let pool = setup_test_db().await?;

    // Step 1: two accounts
    let alice = users::register(&pool, registration("Alice")).await?;
    let bob = users::register(&pool, registration("Bob")).await?;
    assert_eq!(alice.username, "alice");
    assert_eq!(bob.email, "bob@test.com");

    // login round-trips, including the failure modes
    let back = users::authenticate(&pool, "ALICE@test.com", "password123").await?;
    assert_eq!(back.uuid, alice.uuid);
    assert!(matches!(
        users::authenticate(&pool, "carol@test.com", "password123").await,
        Err(AppError::Auth(_))
    ));
    assert!(matches!(
        users::authenticate(&pool, "alice@test.com", "nope").await,
        Err(AppError::Auth(_))
    ));

    // Step 2: Alice opens a room
    let room = rooms::create_room(&pool, &alice, "Python Study", "Python", "weekly").await?;

    let found = search::list_rooms(&pool, "python").await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].uuid, room.uuid);
    assert_eq!(found[0].host_username, "alice");

    // Step 3: Bob cannot administer it
    assert!(matches!(
        rooms::update_room(&pool, &bob, &room.uuid, "Bob's now", "Python", "").await,
        Err(AppError::PermissionDenied)
    ));
    assert!(matches!(
        rooms::delete_room(&pool, &bob, &room.uuid).await,
        Err(AppError::PermissionDenied)
    ));

    // Step 4: Bob joins the conversation
    let hello = messages::post_message(&pool, &bob, &room.uuid, "hi alice").await?;
    messages::post_message(&pool, &bob, &room.uuid, "anyone here?").await?;

    let participants = search::room_participants(&pool, &room.uuid).await?;
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0].uuid, bob.uuid);

    let feed = search::recent_activity(&pool, "").await?;
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].body, "anyone here?");

    // Alice cannot delete Bob's message, Bob can
    assert!(matches!(
        messages::delete_message(&pool, &alice, &hello.uuid).await,
        Err(AppError::PermissionDenied)
    ));
    messages::delete_message(&pool, &bob, &hello.uuid).await?;

    // Step 5: Bob fixes up his profile without losing the rest of it
    let bob = users::update_profile(
        &pool,
        &bob,
        ProfilePatch {
            bio: Some("pythonista".to_owned()),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(bob.bio, "pythonista");
    assert_eq!(bob.email, "bob@test.com");

    let profile = search::user_profile(&pool, &bob.uuid).await?;
    assert_eq!(profile.messages.len(), 1);
    assert!(profile.rooms.is_empty());

    // Step 6: Alice tears the room down; everything in it goes too
    rooms::delete_room(&pool, &alice, &room.uuid).await?;

    assert!(matches!(
        search::get_room(&pool, &room.uuid).await,
        Err(AppError::NotFound("room"))
    ));
    assert!(search::recent_activity(&pool, "").await?.is_empty());
    assert!(search::list_rooms(&pool, "").await?.is_empty());

    // the topic outlives its last room
    let topics = search::list_topics(&pool, "", None).await?;
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].name, "Python");
    assert_eq!(topics[0].room_count, 0);

    Ok(())
}
