pub mod activity;
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod home;
pub mod models;
pub mod profiles;
pub mod res;
pub mod rooms;
pub mod session;
pub mod store;
pub mod topics;

use axum::extract::FromRef;
use sqlx::SqlitePool;

pub use error::{AppError, AppResult};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}
