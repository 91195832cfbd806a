use axum::{
    debug_handler,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, home::SearchQuery, include_res, res, session, store};

#[debug_handler]
pub async fn activity(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Query(SearchQuery { q }): Query<SearchQuery>,
) -> AppResult<Response> {
    let q = q.unwrap_or_default();
    let user = session::current_user(&session, &db_pool).await?;

    let feed = store::search::recent_activity(&db_pool, &q).await?;
    let activity_items: String = feed.iter().map(res::activity_item).collect();

    let body = include_res!(str, "/pages/activity.html")
        .replace("{nav}", &res::nav(user.as_ref()))
        .replace("{activity_items}", &activity_items);

    Ok(Html(body).into_response())
}
