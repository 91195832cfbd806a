use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub uuid: String,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub bio: String,
    pub avatar: String,
    pub created: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Topic {
    pub uuid: String,
    pub name: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub uuid: String,
    pub host_id: String,
    pub topic_id: String,
    pub name: String,
    pub description: String,
    pub created: String,
    pub updated: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub uuid: String,
    pub room_id: String,
    pub user_id: String,
    pub body: String,
    pub created: String,
}

/// A room joined with its host and topic, as the pages show it.
#[derive(Debug, Clone, FromRow)]
pub struct RoomView {
    pub uuid: String,
    pub host_id: String,
    pub host_username: String,
    pub topic_name: String,
    pub name: String,
    pub description: String,
    pub created: String,
}

/// A message joined with its author and room.
#[derive(Debug, Clone, FromRow)]
pub struct MessageView {
    pub uuid: String,
    pub room_id: String,
    pub room_name: String,
    pub user_id: String,
    pub username: String,
    pub body: String,
    pub created: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct TopicCount {
    pub uuid: String,
    pub name: String,
    pub room_count: i64,
}

/// Everything the profile page needs in one read.
#[derive(Debug)]
pub struct Profile {
    pub user: User,
    pub rooms: Vec<RoomView>,
    pub messages: Vec<MessageView>,
    pub topics: Vec<TopicCount>,
}
