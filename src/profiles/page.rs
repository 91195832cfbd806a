use axum::{
    debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{AppResult, include_res, res, session, store};

#[debug_handler]
pub(crate) async fn profile(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(profile_id): Path<Uuid>,
) -> AppResult<Response> {
    let viewer = session::current_user(&session, &db_pool).await?;
    let profile = store::search::user_profile(&db_pool, &profile_id.to_string()).await?;

    let room_items: String = profile.rooms.iter().map(res::room_item).collect();
    let activity_items: String = profile.messages.iter().map(res::activity_item).collect();
    let topic_items: String = profile.topics.iter().map(res::topic_item).collect();

    let edit_link = match &viewer {
        Some(viewer) if viewer.uuid == profile.user.uuid => {
            "<a href=\"/p/edit\">edit profile</a>".to_owned()
        }
        _ => String::new(),
    };

    let body = include_res!(str, "/pages/profile.html")
        .replace("{nav}", &res::nav(viewer.as_ref()))
        .replace("{username}", &res::escape(&profile.user.username))
        .replace("{name}", &res::escape(&profile.user.name))
        .replace("{bio}", &res::escape(&profile.user.bio))
        .replace("{avatar}", &res::escape(&profile.user.avatar))
        .replace("{edit_link}", &edit_link)
        .replace("{room_items}", &room_items)
        .replace("{activity_items}", &activity_items)
        .replace("{topic_items}", &topic_items);

    Ok(Html(body).into_response())
}
