//! Session tokens and the identity they carry.

use crate::account::domain::Actor;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// Opaque bearer token identifying an authenticated session.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generates a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wraps a token presented by a client.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Authenticated identity bound to a token until it expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    actor: Actor,
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session for `actor` valid until `expires_at`.
    #[must_use]
    pub const fn new(actor: Actor, expires_at: DateTime<Utc>) -> Self {
        Self { actor, expires_at }
    }

    /// Returns the authenticated actor.
    #[must_use]
    pub const fn actor(&self) -> Actor {
        self.actor
    }

    /// Returns the expiry instant.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns `true` once `now` has reached the expiry instant.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
