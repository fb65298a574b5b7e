//! User aggregate root and profile types.

use super::{EmailAddress, PasswordDigest, Role, UserDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Descriptive profile attached to a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    name: String,
    phone: Option<String>,
    area: Option<String>,
    tools: Vec<String>,
}

impl UserProfile {
    /// Creates a profile with the required display name.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyName`] when the name is empty after
    /// trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = name.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(UserDomainError::EmptyName);
        }
        Ok(Self {
            name: normalized.to_owned(),
            phone: None,
            area: None,
            tools: Vec::new(),
        })
    }

    /// Sets the contact phone number. Blank values are ignored.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = non_blank(phone.into());
        self
    }

    /// Sets the service area. Blank values are ignored.
    #[must_use]
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = non_blank(area.into());
        self
    }

    /// Sets owned tool labels.
    ///
    /// Labels are trimmed, blanks dropped and duplicates removed while the
    /// first occurrence order is kept.
    #[must_use]
    pub fn with_tools(mut self, tools: impl IntoIterator<Item = String>) -> Self {
        let mut normalized: Vec<String> = Vec::new();
        for tool in tools {
            let label = tool.trim();
            if !label.is_empty() && !normalized.iter().any(|known| known == label) {
                normalized.push(label.to_owned());
            }
        }
        self.tools = normalized;
        self
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the contact phone number, if any.
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
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// User aggregate root.
///
/// The role is fixed at construction; there is no operation that changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    password_digest: PasswordDigest,
    role: Role,
    profile: UserProfile,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted login e-mail.
    pub email: EmailAddress,
    /// Persisted password digest.
    pub password_digest: PasswordDigest,
    /// Persisted role.
    pub role: Role,
    /// Persisted profile.
    pub profile: UserProfile,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user account.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::ToolsRequireWorker`] when the profile lists
    /// tools for a role other than [`Role::Worker`].
    pub fn new(
        email: EmailAddress,
        password_digest: PasswordDigest,
        role: Role,
        profile: UserProfile,
        clock: &impl Clock,
    ) -> Result<Self, UserDomainError> {
        if role != Role::Worker && !profile.tools().is_empty() {
            return Err(UserDomainError::ToolsRequireWorker(role));
        }

        Ok(Self {
            id: UserId::new(),
            email,
            password_digest,
            role,
            profile,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            password_digest: data.password_digest,
            role: data.role,
            profile: data.profile,
            created_at: data.created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login e-mail.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the stored password digest.
    #[must_use]
    pub const fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }

    /// Returns the account role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the descriptive profile.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the resolved identity this user acts under.
    #[must_use]
    pub const fn actor(&self) -> Actor {
        Actor::new(self.id, self.role)
    }
}

/// Authenticated identity on whose behalf an operation runs.
///
/// Services never read ambient session state; the caller resolves the
/// session first and passes the actor explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    user_id: UserId,
    role: Role,
}

impl Actor {
    /// Creates an actor from a user identifier and role.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Returns the acting user identifier.
    #[must_use]
    pub const fn user_id(self) -> UserId {
        self.user_id
    }

    /// Returns the acting role.
    #[must_use]
    pub const fn role(self) -> Role {
        self.role
    }
}
