//! Response payloads that are not domain aggregates.

use crate::account::domain::{Actor, User, UserId};
use crate::session::SessionToken;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    token: SessionToken,
    actor: Actor,
    name: String,
}

impl LoginOutcome {
    pub(crate) const fn new(token: SessionToken, actor: Actor, name: String) -> Self {
        Self { token, actor, name }
    }

    /// Returns the session token to present on later calls.
    #[must_use]
    pub const fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Returns the authenticated actor.
    #[must_use]
    pub const fn actor(&self) -> Actor {
        self.actor
    }

    /// Returns the user's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Identity behind the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    actor: Actor,
    name: String,
}

impl CurrentUser {
    pub(crate) const fn new(actor: Actor, name: String) -> Self {
        Self { actor, name }
    }

    /// Returns the authenticated actor.
    #[must_use]
    pub const fn actor(&self) -> Actor {
        self.actor
    }

    /// Returns the user's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Worker account as shown to admins. Never includes the password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerSummary {
    id: UserId,
    email: String,
    name: String,
    phone: Option<String>,
    area: Option<String>,
    tools: Vec<String>,
    created_at: DateTime<Utc>,
}

impl WorkerSummary {
    /// Returns the worker identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login e-mail.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the phone number, if any.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the service area, if any.
    #[must_use]
    pub fn area(&self) -> Option<&str> {
        self.area.as_deref()
    }

    /// Returns the owned tool labels.
    #[must_use]
    pub fn tools(&self) -> &[String] {
        &self.tools
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl From<&User> for WorkerSummary {
    fn from(user: &User) -> Self {
        let profile = user.profile();
        Self {
            id: user.id(),
            email: user.email().as_str().to_owned(),
            name: profile.name().to_owned(),
            phone: profile.phone().map(str::to_owned),
            area: profile.area().map(str::to_owned),
            tools: profile.tools().to_vec(),
            created_at: user.created_at(),
        }
    }
}
