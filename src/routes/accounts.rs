use axum::{
    extract::{rejection::FormRejection, State},
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use chrono::Utc;

use crate::auth::session::{expired_session_cookie, session_cookie, session_token};
use crate::error::ApiError;
use crate::models::{Account, LoginForm, SignupForm};
use crate::routes::AppState;
use crate::views;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/signup", get(signup_page).post(signup))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .with_state(state)
}

async fn signup_page() -> Html<String> {
    Html(views::signup_page())
}

async fn login_page() -> Html<String> {
    Html(views::login_page())
}

async fn signup(
    State(state): State<AppState>,
    form: Result<Form<SignupForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = form?;
    if form.username.is_empty() || form.password.is_empty() || form.confirm_password.is_empty() {
        return Err(ApiError::Validation("All fields are required!".into()));
    }
    if form.password != form.confirm_password {
        return Err(ApiError::Validation("Passwords do not match!".into()));
    }
    if state.store.find_account(&form.username).await?.is_some() {
        return Err(ApiError::Validation("Username already exists!".into()));
    }

    let hasher = state.hasher;
    let password = form.password;
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password)).await?;

    // a concurrent signup may still win the race; the store reports it as a duplicate
    state
        .store
        .insert_account(&Account {
            username: form.username.clone(),
            password_hash,
            created_at: Utc::now(),
        })
        .await?;

    tracing::info!(username = %form.username, "👤 Account created");
    Ok(Redirect::to("/login"))
}

async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(form) = form?;
    let Some(account) = state.store.find_account(&form.username).await? else {
        tracing::info!(username = %form.username, "🔒 Login for unknown user");
        return Err(ApiError::NotFound("User does not exist!".into()));
    };

    let hasher = state.hasher;
    let password = form.password;
    let stored = account.password_hash;
    let verified = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored)).await?;
    if !verified {
        tracing::info!(username = %account.username, "🔒 Login with wrong password");
        return Err(ApiError::Auth("Incorrect password!".into()));
    }

    let token = state.sessions.create(&account.username);
    tracing::info!(
        username = %account.username,
        active_sessions = state.sessions.len(),
        "🔑 Logged in"
    );

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token))]),
        Redirect::to("/"),
    )
        .into_response())
}

async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.sessions.destroy(&token);
    }
    (
        AppendHeaders([(SET_COOKIE, expired_session_cookie())]),
        Redirect::to("/login"),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{body_string, form_request, get_request, test_state, RecordingClassifier};
    use axum::http::{header::LOCATION, StatusCode};
    use tower::ServiceExt;

    async fn error_of(response: Response) -> (StatusCode, String) {
        let status = response.status();
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        (status, json["error"].as_str().unwrap_or_default().to_string())
    }

    fn cookie_token(response: &Response) -> String {
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(axum::http::header::COOKIE, cookie.parse().unwrap());
        session_token(&headers).unwrap()
    }

    #[tokio::test]
    async fn signup_rejects_each_invalid_form() {
        let state = test_state(RecordingClassifier::returning(1));
        let cases = [
            ("username=&password=pw&confirm_password=pw", "All fields are required!"),
            ("username=kim&password=&confirm_password=pw", "All fields are required!"),
            ("username=kim&password=pw&confirm_password=", "All fields are required!"),
            ("username=kim&password=pw&confirm_password=other", "Passwords do not match!"),
        ];
        for (body, expected) in cases {
            let app = crate::routes::app(state.clone());
            let response = app.oneshot(form_request("/signup", body, None)).await.unwrap();
            assert_eq!(error_of(response).await, (StatusCode::BAD_REQUEST, expected.to_string()), "{body}");
        }
        assert!(state.store.find_account("kim").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unreadable_form_bodies_are_json_bad_requests() {
        let state = test_state(RecordingClassifier::returning(1));
        for uri in ["/signup", "/login"] {
            let request = axum::http::Request::builder()
                .method("POST")
                .uri(uri)
                .body(axum::body::Body::from("username=kim&password=pw"))
                .unwrap();
            let response = crate::routes::app(state.clone()).oneshot(request).await.unwrap();
            let (status, message) = error_of(response).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(message.contains("Content-Type"), "{uri}: {message}");
        }
        assert!(state.store.find_account("kim").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_username() {
        let state = test_state(RecordingClassifier::returning(1));
        let body = "username=kim&password=pw&confirm_password=pw";

        let first = crate::routes::app(state.clone())
            .oneshot(form_request("/signup", body, None))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::SEE_OTHER);
        assert_eq!(first.headers()[LOCATION], "/login");

        let second = crate::routes::app(state)
            .oneshot(form_request("/signup", body, None))
            .await
            .unwrap();
        assert_eq!(
            error_of(second).await,
            (StatusCode::BAD_REQUEST, "Username already exists!".to_string())
        );
    }

    #[tokio::test]
    async fn signup_stores_only_a_hash() {
        let state = test_state(RecordingClassifier::returning(1));
        crate::routes::app(state.clone())
            .oneshot(form_request("/signup", "username=kim&password=s3cret&confirm_password=s3cret", None))
            .await
            .unwrap();

        let account = state.store.find_account("kim").await.unwrap().unwrap();
        assert!(!account.password_hash.contains("s3cret"));
        assert!(state.hasher.verify("s3cret", &account.password_hash));
    }

    #[tokio::test]
    async fn login_distinguishes_unknown_user_and_wrong_password() {
        let state = test_state(RecordingClassifier::returning(1));
        crate::routes::app(state.clone())
            .oneshot(form_request("/signup", "username=kim&password=pw&confirm_password=pw", None))
            .await
            .unwrap();

        let unknown = crate::routes::app(state.clone())
            .oneshot(form_request("/login", "username=lee&password=pw", None))
            .await
            .unwrap();
        assert_eq!(
            error_of(unknown).await,
            (StatusCode::NOT_FOUND, "User does not exist!".to_string())
        );

        let wrong = crate::routes::app(state)
            .oneshot(form_request("/login", "username=kim&password=nope", None))
            .await
            .unwrap();
        assert_eq!(
            error_of(wrong).await,
            (StatusCode::UNAUTHORIZED, "Incorrect password!".to_string())
        );
    }

    #[tokio::test]
    async fn login_then_logout() {
        let state = test_state(RecordingClassifier::returning(1));
        crate::routes::app(state.clone())
            .oneshot(form_request("/signup", "username=kim&password=pw&confirm_password=pw", None))
            .await
            .unwrap();

        let response = crate::routes::app(state.clone())
            .oneshot(form_request("/login", "username=kim&password=pw", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/");
        let token = cookie_token(&response);
        assert_eq!(state.sessions.username(&token).as_deref(), Some("kim"));

        let response = crate::routes::app(state.clone())
            .oneshot(get_request("/logout", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.headers()[LOCATION], "/login");
        assert!(response.headers()[SET_COOKIE].to_str().unwrap().contains("Max-Age=0"));
        assert_eq!(state.sessions.username(&token), None);
    }

    #[tokio::test]
    async fn logout_without_session_is_a_no_op() {
        let state = test_state(RecordingClassifier::returning(1));
        let response = crate::routes::app(state)
            .oneshot(get_request("/logout", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login");
    }

    #[tokio::test]
    async fn account_pages_render_forms() {
        let state = test_state(RecordingClassifier::returning(1));
        let signup = crate::routes::app(state.clone())
            .oneshot(get_request("/signup", None))
            .await
            .unwrap();
        assert!(body_string(signup).await.contains(r#"name="confirm_password""#));

        let login = crate::routes::app(state)
            .oneshot(get_request("/login", None))
            .await
            .unwrap();
        assert!(body_string(login).await.contains(r#"action="/login""#));
    }
}
