pub mod accounts;
pub mod pages;
pub mod predict;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::assessment::classifier::SeverityClassifier;
use crate::auth::password::PasswordHasher;
use crate::auth::session::SessionStore;
use crate::store::Store;

/// Everything a handler needs, built once in `main`.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub classifier: Arc<dyn SeverityClassifier>,
    pub sessions: SessionStore,
    pub hasher: PasswordHasher,
    pub require_login: bool,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(pages::routes(state.clone()))
        .merge(predict::routes(state.clone()))
        .merge(accounts::routes(state))
        .route("/health", get(|| async { "✅ Backend up" }))
}
