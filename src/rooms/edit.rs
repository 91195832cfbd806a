use axum::{
    Form, debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{AppError, AppResult, include_res, res, session, store};

use super::{new::RoomForm, topic_options};

#[debug_handler]
pub(crate) async fn edit_room_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(room_id): Path<Uuid>,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let room = store::search::get_room_view(&db_pool, &room_id.to_string()).await?;
    if room.host_id != user.uuid {
        return Err(AppError::PermissionDenied);
    }

    let body = include_res!(str, "/pages/room_form.html")
        .replace("{nav}", &res::nav(Some(&user)))
        .replace("{action}", &format!("/r/{room_id}/edit"))
        .replace("{name}", &res::escape(&room.name))
        .replace("{topic}", &res::escape(&room.topic_name))
        .replace("{description}", &res::escape(&room.description))
        .replace("{topic_options}", &topic_options(&db_pool).await?);

    Ok(Html(body).into_response())
}

#[debug_handler]
pub(crate) async fn edit_room(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(room_id): Path<Uuid>,
    Form(form): Form<RoomForm>,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    store::rooms::update_room(
        &db_pool,
        &user,
        &room_id.to_string(),
        &form.name,
        &form.topic,
        &form.description,
    )
    .await?;

    Ok(Redirect::to("/").into_response())
}
