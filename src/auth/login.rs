use axum::{
    Form, debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;
use tracing::info;

use crate::{AppError, AppResult, include_res, res, session, session::USER_ID, store};

#[derive(Deserialize)]
pub(crate) struct LoginForm {
    email: String,
    password: String,
}

#[debug_handler]
pub(crate) async fn login_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    // a logged-in user has no business on the login page
    if session::current_user(&session, &db_pool).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    Ok(Html(login_html("")).into_response())
}

#[debug_handler]
pub(crate) async fn login(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(LoginForm { email, password }): Form<LoginForm>,
) -> AppResult<Response> {
    match store::users::authenticate(&db_pool, &email, &password).await {
        Ok(user) => {
            session.insert(USER_ID, &user.uuid).await?;
            info!("login: {}", user.username);
            Ok(Redirect::to("/").into_response())
        }
        Err(AppError::Auth(message)) => Ok(Html(login_html(&message)).into_response()),
        Err(err) => Err(err),
    }
}

fn login_html(error: &str) -> String {
    include_res!(str, "/pages/login.html").replace("{error}", &res::escape(error))
}
