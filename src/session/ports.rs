//! Port contract for session storage.

use super::domain::SessionToken;
use crate::account::domain::Actor;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for session store operations.
pub type SessionStoreResult<T> = Result<T, SessionStoreError>;

/// Maps opaque tokens to authenticated actors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Opens a session for `actor` and returns its token.
    async fn issue(&self, actor: Actor) -> SessionStoreResult<SessionToken>;

    /// Returns the actor bound to `token`.
    ///
    /// Unknown, revoked and expired tokens resolve to `None`.
    async fn resolve(&self, token: &SessionToken) -> SessionStoreResult<Option<Actor>>;

    /// Ends the session for `token`. Unknown tokens are ignored.
    async fn revoke(&self, token: &SessionToken) -> SessionStoreResult<()>;
}

/// Errors returned by session store implementations.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    /// Storage-layer failure.
    #[error("session storage error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SessionStoreError {
    /// Wraps a storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
