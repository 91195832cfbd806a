use axum::{debug_handler, http::header, response::IntoResponse};

use crate::models::{MessageView, RoomView, TopicCount, User};

#[macro_export]
macro_rules! include_res {
    (bytes, $p:expr) => {
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
    (str, $p:expr) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
}

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn markdown(body: &str) -> String {
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, pulldown_cmark::Parser::new(body));
    html
}

pub fn nav(user: Option<&User>) -> String {
    match user {
        Some(user) => include_res!(str, "/pages/nav_in.html")
            .replace("{user_id}", &user.uuid)
            .replace("{username}", &escape(&user.username)),
        None => include_res!(str, "/pages/nav_out.html").to_owned(),
    }
}

pub fn room_item(room: &RoomView) -> String {
    include_res!(str, "/pages/room_item.html")
        .replace("{id}", &room.uuid)
        .replace("{name}", &escape(&room.name))
        .replace("{topic}", &escape(&room.topic_name))
        .replace("{host_id}", &room.host_id)
        .replace("{host}", &escape(&room.host_username))
}

pub fn topic_item(topic: &TopicCount) -> String {
    include_res!(str, "/pages/topic_item.html")
        .replace("{name}", &escape(&topic.name))
        .replace("{room_count}", &topic.room_count.to_string())
}

pub fn activity_item(message: &MessageView) -> String {
    include_res!(str, "/pages/activity_item.html")
        .replace("{user_id}", &message.user_id)
        .replace("{username}", &escape(&message.username))
        .replace("{room_id}", &message.room_id)
        .replace("{room_name}", &escape(&message.room_name))
        .replace("{created}", &escape(&message.created))
        .replace("{body}", &escape(&message.body))
}

#[debug_handler]
pub async fn avatar() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        include_res!(bytes, "/avatar.svg").as_slice(),
    )
}
