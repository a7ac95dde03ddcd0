//! Shared fixtures for handler and assessment tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::Request;
use axum::response::Response;

use crate::assessment::classifier::{ClassifierError, SeverityClassifier};
use crate::assessment::encoder::FeatureVector;
use crate::auth::password::PasswordHasher;
use crate::auth::session::{SessionStore, SESSION_COOKIE};
use crate::routes::AppState;
use crate::store::Store;

/// Classifier stub that returns a fixed class and remembers its inputs.
#[derive(Clone)]
pub struct RecordingClassifier {
    class: i64,
    calls: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<Vec<f64>>>>,
}

impl RecordingClassifier {
    pub fn returning(class: i64) -> Self {
        Self {
            class,
            calls: Arc::new(AtomicUsize::new(0)),
            last: Arc::new(Mutex::new(None)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_features(&self) -> Option<Vec<f64>> {
        self.last.lock().unwrap().clone()
    }
}

impl SeverityClassifier for RecordingClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<i64, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(features.as_slice().to_vec());
        Ok(self.class)
    }
}

pub fn test_state(classifier: RecordingClassifier) -> AppState {
    AppState {
        store: Store::in_memory(),
        classifier: Arc::new(classifier),
        sessions: SessionStore::default(),
        hasher: PasswordHasher::new(1_000),
        require_login: true,
    }
}

fn with_session(builder: axum::http::request::Builder, token: Option<&str>) -> axum::http::request::Builder {
    match token {
        Some(t) => builder.header(COOKIE, format!("{SESSION_COOKIE}={t}")),
        None => builder,
    }
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    with_session(Request::builder().method("GET").uri(uri), token)
        .body(Body::empty())
        .unwrap()
}

pub fn form_request(uri: &str, body: &str, token: Option<&str>) -> Request<Body> {
    with_session(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded"),
        token,
    )
    .body(Body::from(body.to_string()))
    .unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), 1 << 20).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
