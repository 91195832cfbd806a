use axum::{
    debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{AppError, AppResult, include_res, res, session, store};

#[debug_handler]
pub(crate) async fn delete_room_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(room_id): Path<Uuid>,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let room = store::search::get_room(&db_pool, &room_id.to_string()).await?;
    if room.host_id != user.uuid {
        return Err(AppError::PermissionDenied);
    }

    let body = include_res!(str, "/pages/delete.html")
        .replace("{nav}", &res::nav(Some(&user)))
        .replace("{action}", &format!("/r/{room_id}/delete"))
        .replace("{obj}", &res::escape(&room.name));

    Ok(Html(body).into_response())
}

#[debug_handler]
pub(crate) async fn delete_room(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(room_id): Path<Uuid>,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    store::rooms::delete_room(&db_pool, &user, &room_id.to_string()).await?;

    Ok(Redirect::to("/").into_response())
}
