//! In-memory, per-browser session state.
//!
//! Each session owns one [`ListCollection`] plus a one-shot flash message.
//! Nothing is persisted; a session ends when it is evicted for idleness,
//! pushed out as least recently used once the store is full, or the
//! process exits.
//!
//! The store lock makes each request's read-modify-write atomic, but lists
//! and todos are still addressed by position. Two tabs on the same session
//! can race: a delete in one shifts the indices the other tab is still
//! showing, so its next action may hit a different element.

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use chrono::{DateTime, Utc};
use list_store::ListCollection;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

/// Message shown once on the next page the session reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub lists: ListCollection,
    pub flash: Option<Flash>,
    pub last_seen: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            lists: ListCollection::new(),
            flash: None,
            last_seen: Utc::now(),
        }
    }
}

impl Session {
    pub fn take_flash(&mut self) -> Option<Flash> {
        self.flash.take()
    }

    fn is_idle(&self, now: DateTime<Utc>, idle_timeout: Duration) -> bool {
        // A clock step backwards yields a negative age; treat it as fresh
        (now - self.last_seen)
            .to_std()
            .map(|age| age > idle_timeout)
            .unwrap_or(false)
    }
}

/// Session id resolved by the session middleware for the current request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for SessionId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(req.extensions().get::<SessionId>().cloned().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!("Session middleware is not installed"))
        }))
    }
}

pub struct SessionStore {
    /// Least recently used session is dropped when capacity is reached
    sessions: Mutex<LruCache<String, Session>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration, max_sessions: NonZeroUsize) -> Self {
        Self {
            sessions: Mutex::new(LruCache::new(max_sessions)),
            idle_timeout,
        }
    }

    /// Map the id presented by the client to a live session.
    ///
    /// Returns the id to use and whether it was freshly issued. Unknown ids
    /// are never adopted; the client gets a new one instead.
    pub async fn resolve(&self, presented: Option<&str>) -> (SessionId, bool) {
        let mut sessions = self.sessions.lock().await;
        Self::evict_idle_locked(&mut sessions, self.idle_timeout);

        if let Some(id) = presented {
            if let Some(session) = sessions.get_mut(id) {
                session.last_seen = Utc::now();
                return (SessionId(id.to_string()), false);
            }
        }

        let id = Uuid::new_v4().to_string();
        debug!("Issuing new session {}", id);
        if let Some((dropped, _)) = sessions.push(id.clone(), Session::default()) {
            debug!("Session store full, dropped least recently used session {}", dropped);
        }
        (SessionId(id), true)
    }

    /// Run `f` against the session's state. A session that vanished since
    /// it was resolved starts again empty.
    pub async fn with_session<R>(&self, id: &SessionId, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_or_insert_mut(id.0.clone(), Session::default);
        session.last_seen = Utc::now();
        f(session)
    }

    /// Drop idle sessions, returning how many were removed.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        Self::evict_idle_locked(&mut sessions, self.idle_timeout)
    }

    fn evict_idle_locked(sessions: &mut LruCache<String, Session>, idle_timeout: Duration) -> usize {
        let now = Utc::now();
        let idle: Vec<String> = sessions
            .iter()
            .filter(|(_, session)| session.is_idle(now, idle_timeout))
            .map(|(id, _)| id.clone())
            .collect();
        for id in &idle {
            sessions.pop(id);
        }
        if !idle.is_empty() {
            debug!("Evicted {} idle sessions", idle.len());
        }
        idle.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    pub async fn capacity(&self) -> usize {
        self.sessions.lock().await.cap().get()
    }
}
