use axum::{
    Router, debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    AppError, AppResult, AppState, include_res,
    models::{MessageView, User},
    res, session, store,
};

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{uuid}/delete",
        get(delete_message_page).post(delete_message),
    )
}

/// One rendered message row; the delete link only shows for the author.
pub(crate) fn message_item(message: &MessageView, user: Option<&User>) -> String {
    let delete_link = match user {
        Some(user) if user.uuid == message.user_id => {
            format!("<a href=\"/m/{}/delete\">delete</a>", message.uuid)
        }
        _ => String::new(),
    };

    include_res!(str, "/pages/message_item.html")
        .replace("{user_id}", &message.user_id)
        .replace("{username}", &res::escape(&message.username))
        .replace("{created}", &res::escape(&message.created))
        .replace("{body}", &res::markdown(&message.body))
        .replace("{delete_link}", &delete_link)
}

#[debug_handler]
pub(crate) async fn delete_message_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(message_id): Path<Uuid>,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let message = store::messages::get_message(&db_pool, &message_id.to_string()).await?;
    if message.user_id != user.uuid {
        return Err(AppError::PermissionDenied);
    }

    let body = include_res!(str, "/pages/delete.html")
        .replace("{nav}", &res::nav(Some(&user)))
        .replace("{action}", &format!("/m/{message_id}/delete"))
        .replace("{obj}", &res::escape(&message.body));

    Ok(Html(body).into_response())
}

#[debug_handler]
pub(crate) async fn delete_message(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(message_id): Path<Uuid>,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    store::messages::delete_message(&db_pool, &user, &message_id.to_string()).await?;

    Ok(Redirect::to("/").into_response())
}
