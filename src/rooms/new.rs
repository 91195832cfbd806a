use axum::{
    Form, debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, include_res, res, session, store};

use super::topic_options;

#[derive(Deserialize)]
pub(crate) struct RoomForm {
    pub(crate) name: String,
    pub(crate) topic: String,
    pub(crate) description: String,
}

#[debug_handler]
pub(crate) async fn new_room_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let body = include_res!(str, "/pages/room_form.html")
        .replace("{nav}", &res::nav(Some(&user)))
        .replace("{action}", "/r/new")
        .replace("{name}", "")
        .replace("{topic}", "")
        .replace("{description}", "")
        .replace("{topic_options}", &topic_options(&db_pool).await?);

    Ok(Html(body).into_response())
}

#[debug_handler]
pub(crate) async fn new_room(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(RoomForm { name, topic, description }): Form<RoomForm>,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    store::rooms::create_room(&db_pool, &user, &name, &topic, &description).await?;

    Ok(Redirect::to("/").into_response())
}
