use axum::{
    debug_handler,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, include_res, res, session, store};

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[debug_handler]
pub async fn home(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Query(SearchQuery { q }): Query<SearchQuery>,
) -> AppResult<Response> {
    let q = q.unwrap_or_default();
    let user = session::current_user(&session, &db_pool).await?;

    let rooms = store::search::list_rooms(&db_pool, &q).await?;
    let topics = store::search::list_topics(&db_pool, "", Some(5)).await?;
    let activity = store::search::recent_activity(&db_pool, &q).await?;

    let room_items: String = rooms.iter().map(res::room_item).collect();
    let topic_items: String = topics.iter().map(res::topic_item).collect();
    let activity_items: String = activity.iter().map(res::activity_item).collect();

    let body = include_res!(str, "/pages/home.html")
        .replace("{nav}", &res::nav(user.as_ref()))
        .replace("{q}", &res::escape(&q))
        .replace("{room_count}", &rooms.len().to_string())
        .replace("{room_items}", &room_items)
        .replace("{topic_items}", &topic_items)
        .replace("{activity_items}", &activity_items);

    Ok(Html(body).into_response())
}
