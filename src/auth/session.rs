use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "asthma_session";
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);

struct Session {
    username: String,
    created: Instant,
}

/// Server-side sessions: opaque cookie token → username.
///
/// Sessions older than the TTL are treated as logged out. Expired entries
/// are swept whenever a new session is created, so the map stays bounded
/// by the logins of one TTL window.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Session>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        SessionStore {
            inner: Arc::default(),
            ttl,
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        // a panicked holder cannot leave the map half-written
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_live(&self, session: &Session) -> bool {
        session.created.elapsed() < self.ttl
    }

    pub fn create(&self, username: &str) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let mut sessions = self.sessions();
        let before = sessions.len();
        sessions.retain(|_, session| self.is_live(session));
        let swept = before - sessions.len();
        if swept > 0 {
            tracing::debug!(swept, "🧹 Expired sessions removed");
        }
        sessions.insert(
            token.clone(),
            Session {
                username: username.to_string(),
                created: Instant::now(),
            },
        );
        token
    }

    pub fn username(&self, token: &str) -> Option<String> {
        let mut sessions = self.sessions();
        let session = sessions.get(token)?;
        if self.is_live(session) {
            return Some(session.username.clone());
        }
        sessions.remove(token);
        None
    }

    pub fn destroy(&self, token: &str) {
        self.sessions().remove(token);
    }

    pub fn len(&self) -> usize {
        self.sessions().len()
    }
}

/// Pulls our session token out of the request's `Cookie` headers.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.to_string())
}

pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
