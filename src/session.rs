use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, models::User, store};

pub const USER_ID: &str = "user_id";

/// Resolves the session's `user_id` to a full user row, if any.
pub async fn current_user(session: &Session, db_pool: &SqlitePool) -> AppResult<Option<User>> {
    let Some(user_id) = session.get::<String>(USER_ID).await? else {
        return Ok(None);
    };

    store::users::find_user(db_pool, &user_id).await
}
