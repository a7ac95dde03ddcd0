pub mod password;
pub mod session;

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::routes::AppState;

/// The logged-in username, if the request carries a live session cookie.
pub struct CurrentUser(pub Option<String>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let username = session::session_token(&parts.headers)
            .and_then(|token| state.sessions.username(&token));
        Ok(CurrentUser(username))
    }
}

impl CurrentUser {
    /// Whether a page guarded by the login requirement may be served.
    pub fn admitted(&self, state: &AppState) -> bool {
        !state.require_login || self.0.is_some()
    }
}
