use axum::{
    debug_handler,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, home::SearchQuery, include_res, res, session, store};

#[debug_handler]
pub async fn topics(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Query(SearchQuery { q }): Query<SearchQuery>,
) -> AppResult<Response> {
    let q = q.unwrap_or_default();
    let user = session::current_user(&session, &db_pool).await?;

    let topics = store::search::list_topics(&db_pool, &q, None).await?;
    let topic_items: String = topics.iter().map(res::topic_item).collect();

    let body = include_res!(str, "/pages/topics.html")
        .replace("{nav}", &res::nav(user.as_ref()))
        .replace("{q}", &res::escape(&q))
        .replace("{topic_items}", &topic_items);

    Ok(Html(body).into_response())
}
