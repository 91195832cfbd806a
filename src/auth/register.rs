use axum::{
    Form, debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;
use tracing::info;

use crate::{
    AppError, AppResult, include_res, res, session, session::USER_ID, store,
    store::users::Registration,
};

#[derive(Deserialize)]
pub(crate) struct RegisterForm {
    name: String,
    username: String,
    email: String,
    password: String,
}

#[debug_handler]
pub(crate) async fn register_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    if session::current_user(&session, &db_pool).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    Ok(Html(register_html("")).into_response())
}

#[debug_handler]
pub(crate) async fn register(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    let registration = Registration {
        name: form.name,
        username: form.username,
        email: form.email,
        password: form.password,
    };

    match store::users::register(&db_pool, registration).await {
        Ok(user) => {
            session.insert(USER_ID, &user.uuid).await?;
            info!("registered: {}", user.username);
            Ok(Redirect::to("/").into_response())
        }
        Err(AppError::Validation(message)) => Ok(Html(register_html(&message)).into_response()),
        Err(err) => Err(err),
    }
}

fn register_html(error: &str) -> String {
    include_res!(str, "/pages/register.html").replace("{error}", &res::escape(error))
}
