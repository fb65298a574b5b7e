//! In-process session store with a fixed time-to-live.

use crate::account::domain::Actor;
use crate::session::{
    domain::{Session, SessionToken},
    ports::{SessionStore, SessionStoreError, SessionStoreResult},
};
use async_trait::async_trait;
use chrono::TimeDelta;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Default session lifetime.
pub const DEFAULT_SESSION_TTL: TimeDelta = TimeDelta::hours(24);

/// Thread-safe in-memory session store.
///
/// Expired sessions are evicted lazily when resolved, or in bulk through
/// [`InMemorySessionStore::purge_expired`].
pub struct InMemorySessionStore<C: Clock + Send + Sync> {
    sessions: Arc<RwLock<HashMap<SessionToken, Session>>>,
    ttl: TimeDelta,
    clock: Arc<C>,
}

impl<C: Clock + Send + Sync> Clone for InMemorySessionStore<C> {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            ttl: self.ttl,
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C: Clock + Send + Sync> InMemorySessionStore<C> {
    /// Creates an empty store whose sessions last `ttl`.
    #[must_use]
    pub fn new(ttl: TimeDelta, clock: Arc<C>) -> Self {
        Self {
            sessions: Arc::default(),
            ttl,
            clock,
        }
    }

    /// Creates an empty store using [`DEFAULT_SESSION_TTL`].
    #[must_use]
    pub fn with_default_ttl(clock: Arc<C>) -> Self {
        Self::new(DEFAULT_SESSION_TTL, clock)
    }

    /// Drops every expired session and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Persistence`] when the lock is poisoned.
    pub fn purge_expired(&self) -> SessionStoreResult<usize> {
        let now = self.clock.utc();
        let mut sessions = self.sessions.write().map_err(lock_poisoned)?;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        Ok(before.saturating_sub(sessions.len()))
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> SessionStoreError {
    SessionStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C: Clock + Send + Sync> SessionStore for InMemorySessionStore<C> {
    async fn issue(&self, actor: Actor) -> SessionStoreResult<SessionToken> {
        let token = SessionToken::generate();
        let session = Session::new(actor, self.clock.utc() + self.ttl);
        let mut sessions = self.sessions.write().map_err(lock_poisoned)?;
        sessions.insert(token.clone(), session);
        debug!(user_id = %actor.user_id(), expires_at = %session.expires_at(), "session issued");
        Ok(token)
    }

    async fn resolve(&self, token: &SessionToken) -> SessionStoreResult<Option<Actor>> {
        let now = self.clock.utc();
        let mut sessions = self.sessions.write().map_err(lock_poisoned)?;
        let Some(session) = sessions.get(token).copied() else {
            return Ok(None);
        };
        if session.is_expired(now) {
            sessions.remove(token);
            debug!("expired session evicted");
            return Ok(None);
        }
        Ok(Some(session.actor()))
    }

    async fn revoke(&self, token: &SessionToken) -> SessionStoreResult<()> {
        let mut sessions = self.sessions.write().map_err(lock_poisoned)?;
        sessions.remove(token);
        Ok(())
    }
}
