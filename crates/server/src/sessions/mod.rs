//! Server-side sessions keyed by an opaque token.
//!
//! # Lifecycle
//!
//! 1. The OAuth callback stores the Google tokens under a fresh [`SessionId`]
//! 2. The frontend receives the id in the redirect query and sends it back
//!    with every API call
//! 3. Lookups past [`SESSION_TTL`] delete the entry and report it missing
//! 4. A background task sweeps entries nobody looked up again
//!
//! Sessions live in process memory only and do not survive a restart.

mod clock;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{InMemorySessionStore, SessionStore, spawn_sweeper};

pub use ads_analyzer_core::SessionId;
use chrono::{DateTime, TimeDelta, Utc};

use crate::google::OAuthTokens;

/// Fixed session lifetime, measured from creation.
pub const SESSION_TTL: TimeDelta = TimeDelta::hours(24);

/// Tokens stored for one signed-in browser.
#[derive(Debug, Clone)]
pub struct Session {
    pub tokens: OAuthTokens,
    pub created_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub const fn new(tokens: OAuthTokens, created_at: DateTime<Utc>) -> Self {
        Self { tokens, created_at }
    }

    /// When the session stops being valid.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + SESSION_TTL
    }

    /// Whether the session is expired at `now`. Expiry is inclusive.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expiry_boundary() {
        let created = DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default();
        let session = Session::new(OAuthTokens::offline(created), created);

        assert!(!session.is_expired_at(created + TimeDelta::minutes(23 * 60 + 59)));
        assert!(session.is_expired_at(created + TimeDelta::hours(24)));
        assert!(session.is_expired_at(created + TimeDelta::minutes(24 * 60 + 1)));
    }
}
