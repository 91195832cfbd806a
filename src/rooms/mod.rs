mod delete;
mod edit;
pub mod msg;
mod new;
mod room;

use axum::{Router, routing::get};
use sqlx::SqlitePool;

use crate::{AppResult, AppState, res, store};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/new", get(new::new_room_page).post(new::new_room))
        .route("/{uuid}", get(room::room_page).post(room::post_message))
        .route("/{uuid}/edit", get(edit::edit_room_page).post(edit::edit_room))
        .route("/{uuid}/delete", get(delete::delete_room_page).post(delete::delete_room))
}

/// `<datalist>` entries so the room form can offer existing topics while
/// still accepting a brand-new name.
pub(crate) async fn topic_options(db_pool: &SqlitePool) -> AppResult<String> {
    let topics = store::search::list_topics(db_pool, "", None).await?;

    Ok(topics
        .iter()
        .map(|topic| format!("<option value=\"{}\">", res::escape(&topic.name)))
        .collect())
}
