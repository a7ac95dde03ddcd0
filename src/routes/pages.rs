use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};

use crate::auth::CurrentUser;
use crate::routes::AppState;
use crate::views;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .with_state(state)
}

async fn index(State(state): State<AppState>, user: CurrentUser) -> Response {
    if !user.admitted(&state) {
        return Redirect::to("/login").into_response();
    }
    Html(views::symptom_form(user.0.as_deref())).into_response()
}
