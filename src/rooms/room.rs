use axum::{
    Form, debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{AppResult, include_res, models::User, res, session, store};

use super::msg;

#[derive(Deserialize)]
pub(crate) struct MessageForm {
    body: String,
}

#[debug_handler]
pub(crate) async fn room_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(room_id): Path<Uuid>,
) -> AppResult<Response> {
    let room_id = room_id.to_string();
    let user = session::current_user(&session, &db_pool).await?;

    let room = store::search::get_room_view(&db_pool, &room_id).await?;
    let messages = store::search::room_messages(&db_pool, &room_id).await?;
    let participants = store::search::room_participants(&db_pool, &room_id).await?;

    let message_items: String = messages
        .iter()
        .map(|message| msg::message_item(message, user.as_ref()))
        .collect();

    let participant_items: String = participants
        .iter()
        .map(|participant| {
            include_res!(str, "/pages/participant_item.html")
                .replace("{user_id}", &participant.uuid)
                .replace("{username}", &res::escape(&participant.username))
        })
        .collect();

    let body = include_res!(str, "/pages/room.html")
        .replace("{nav}", &res::nav(user.as_ref()))
        .replace("{id}", &room.uuid)
        .replace("{name}", &res::escape(&room.name))
        .replace("{topic}", &res::escape(&room.topic_name))
        .replace("{host_id}", &room.host_id)
        .replace("{host}", &res::escape(&room.host_username))
        .replace("{description}", &res::escape(&room.description))
        .replace("{host_controls}", &host_controls(&room.uuid, &room.host_id, user.as_ref()))
        .replace("{composer}", &composer(&room.uuid, user.as_ref()))
        .replace("{message_items}", &message_items)
        .replace("{participant_items}", &participant_items);

    Ok(Html(body).into_response())
}

#[debug_handler]
pub(crate) async fn post_message(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(room_id): Path<Uuid>,
    Form(MessageForm { body }): Form<MessageForm>,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    store::messages::post_message(&db_pool, &user, &room_id.to_string(), &body).await?;

    Ok(Redirect::to(&format!("/r/{room_id}")).into_response())
}

fn host_controls(room_id: &str, host_id: &str, user: Option<&User>) -> String {
    match user {
        Some(user) if user.uuid == host_id => format!(
            "<a href=\"/r/{room_id}/edit\">edit</a> <a href=\"/r/{room_id}/delete\">delete</a>"
        ),
        _ => String::new(),
    }
}

fn composer(room_id: &str, user: Option<&User>) -> String {
    match user {
        Some(_) => include_res!(str, "/pages/composer.html").replace("{id}", room_id),
        None => "<p><a href=\"/login\">log in</a> to join the conversation</p>".to_owned(),
    }
}
