//! Read-only JSON surface. Foreign keys are flattened to identifiers;
//! participants come along as an id array.

use axum::{
    Json, Router, debug_handler,
    extract::{Path, State},
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use crate::{AppResult, AppState, models::Room, store};

pub fn router() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(get_routes))
        .route("/rooms/", get(get_rooms))
        .route("/rooms/{uuid}/", get(get_room))
        .layer(cors)
}

#[derive(Serialize)]
struct RoomRepr {
    id: String,
    host: String,
    topic: String,
    name: String,
    description: String,
    participants: Vec<String>,
    created: String,
    updated: String,
}

async fn room_repr(db_pool: &SqlitePool, room: Room) -> AppResult<RoomRepr> {
    let participants = store::search::participant_ids(db_pool, &room.uuid).await?;

    Ok(RoomRepr {
        id: room.uuid,
        host: room.host_id,
        topic: room.topic_id,
        name: room.name,
        description: room.description,
        participants,
        created: room.created,
        updated: room.updated,
    })
}

#[debug_handler]
async fn get_routes() -> Json<Vec<&'static str>> {
    Json(vec!["GET /api", "GET /api/rooms", "GET /api/rooms/:id"])
}

#[debug_handler]
async fn get_rooms(State(db_pool): State<SqlitePool>) -> AppResult<Json<Vec<RoomRepr>>> {
    let rooms = store::search::all_rooms(&db_pool).await?;

    let mut reprs = Vec::with_capacity(rooms.len());
    for room in rooms {
        reprs.push(room_repr(&db_pool, room).await?);
    }

    Ok(Json(reprs))
}

#[debug_handler]
async fn get_room(
    State(db_pool): State<SqlitePool>,
    Path(room_id): Path<Uuid>,
) -> AppResult<Json<RoomRepr>> {
    let room = store::search::get_room(&db_pool, &room_id.to_string()).await?;

    Ok(Json(room_repr(&db_pool, room).await?))
}
