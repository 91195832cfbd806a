mod edit;
mod page;

use axum::{Router, routing::get};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/edit", get(edit::edit_profile_page).post(edit::edit_profile))
        .route("/{uuid}", get(page::profile))
}
