use axum::{
    Form, debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    AppError, AppResult, include_res, models::User, res, session, store,
    store::users::ProfilePatch,
};

#[derive(Deserialize)]
pub(crate) struct ProfileForm {
    name: Option<String>,
    username: Option<String>,
    email: Option<String>,
    bio: Option<String>,
    avatar: Option<String>,
}

#[debug_handler]
pub(crate) async fn edit_profile_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    Ok(Html(form_html(&user, "")).into_response())
}

#[debug_handler]
pub(crate) async fn edit_profile(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(form): Form<ProfileForm>,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let patch = ProfilePatch {
        name: form.name,
        username: form.username,
        email: form.email,
        bio: form.bio,
        avatar: form.avatar,
    };

    match store::users::update_profile(&db_pool, &user, patch).await {
        Ok(updated) => Ok(Redirect::to(&format!("/p/{}", updated.uuid)).into_response()),
        Err(AppError::Validation(message)) => Ok(Html(form_html(&user, &message)).into_response()),
        Err(err) => Err(err),
    }
}

fn form_html(user: &User, error: &str) -> String {
    include_res!(str, "/pages/update_user.html")
        .replace("{nav}", &res::nav(Some(user)))
        .replace("{error}", &res::escape(error))
        .replace("{name}", &res::escape(&user.name))
        .replace("{username}", &res::escape(&user.username))
        .replace("{email}", &res::escape(&user.email))
        .replace("{bio}", &res::escape(&user.bio))
        .replace("{avatar}", &res::escape(&user.avatar))
}
