//! Session storage.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::task::JoinHandle;

use super::{Clock, Session, SessionId, SystemClock};

/// Storage for sessions.
///
/// Implementations own expiry: [`SessionStore::get`] never returns a session
/// that is expired by the store's clock.
pub trait SessionStore: Send + Sync {
    /// Current time by the store's clock. New sessions take their
    /// `created_at` from here.
    fn now(&self) -> DateTime<Utc>;

    /// Look up a live session. Expired entries are deleted and reported missing.
    fn get(&self, id: &SessionId) -> Option<Session>;

    /// Insert or replace a session.
    fn put(&self, id: SessionId, session: Session);

    /// Remove a session. Returns whether it existed.
    fn delete(&self, id: &SessionId) -> bool;

    /// Remove every expired session. Returns how many were removed.
    fn sweep_expired(&self) -> usize;

    /// Number of stored sessions, expired ones included until swept.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local session store.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
    clock: Arc<dyn Clock>,
}

impl InMemorySessionStore {
    /// Create a store backed by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a store with an explicit clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            clock,
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemorySessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySessionStore")
            .field("sessions", &self.sessions.read().len())
            .finish_non_exhaustive()
    }
}

impl SessionStore for InMemorySessionStore {
    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn get(&self, id: &SessionId) -> Option<Session> {
        let now = self.clock.now();

        {
            let sessions = self.sessions.read();
            let session = sessions.get(id)?;
            if !session.is_expired_at(now) {
                return Some(session.clone());
            }
        }

        // Re-check under the write lock; a concurrent put may have replaced it
        let mut sessions = self.sessions.write();
        if sessions.get(id).is_some_and(|s| s.is_expired_at(now)) {
            sessions.remove(id);
            tracing::debug!("Expired session removed on lookup");
        }
        None
    }

    fn put(&self, id: SessionId, session: Session) {
        self.sessions.write().insert(id, session);
    }

    fn delete(&self, id: &SessionId) -> bool {
        self.sessions.write().remove(id).is_some()
    }

    fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        before - sessions.len()
    }

    fn len(&self) -> usize {
        self.sessions.read().len()
    }
}

/// Spawn a task that sweeps expired sessions every `interval`.
///
/// Lookups stay authoritative for expiry; the sweep only bounds memory held
/// by sessions that are never looked up again.
pub fn spawn_sweeper(store: Arc<dyn SessionStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = store.sweep_expired();
            if removed > 0 {
                tracing::info!(removed, remaining = store.len(), "Swept expired sessions");
            }
        }
    })
}
