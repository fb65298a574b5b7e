//! Service layer for registration, credential checks and worker discovery.

use crate::account::{
    domain::{EmailAddress, Password, Role, User, UserDomainError, UserId, UserProfile},
    ports::{PasswordHashError, PasswordHasher, UserRepository, UserRepositoryError},
};
use crate::error::ErrorKind;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for self-service registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    email: String,
    password: String,
    role: Role,
    name: String,
    phone: Option<String>,
    area: Option<String>,
    tools: Vec<String>,
}

impl RegisterUserRequest {
    /// Creates a request with the required account fields.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role,
            name: name.into(),
            phone: None,
            area: None,
            tools: Vec::new(),
        }
    }

    /// Sets the contact phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the worker service area.
    #[must_use]
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    /// Sets owned tool labels.
    #[must_use]
    pub fn with_tools(mut self, tools: impl IntoIterator<Item = String>) -> Self {
        self.tools = tools.into_iter().collect();
        self
    }
}

/// Administrator account created at deployment time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminBootstrap {
    email: String,
    password: String,
    name: String,
    phone: Option<String>,
}

impl AdminBootstrap {
    /// Creates a bootstrap description for the administrator account.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
            phone: None,
        }
    }

    /// Sets the administrator's contact phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// The password hasher failed.
    #[error(transparent)]
    Hashing(#[from] PasswordHashError),
    /// The e-mail is unknown or the password does not match.
    #[error("invalid email or password")]
    InvalidCredentials,
}

impl AccountServiceError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::ValidationFailed,
            Self::Repository(UserRepositoryError::DuplicateEmail(_)) => ErrorKind::ConflictState,
            Self::Repository(_) | Self::Hashing(_) => ErrorKind::StorageFailure,
            Self::InvalidCredentials => ErrorKind::AuthenticationRequired,
        }
    }
}

/// Result type for account service operations.
pub type AccountServiceResult<T> = Result<T, AccountServiceError>;

/// Account registration and credential orchestration service.
#[derive(Clone)]
pub struct AccountService<R, H, C>
where
    R: UserRepository,
    H: PasswordHasher,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<C>,
}

impl<R, H, C> AccountService<R, H, C>
where
    R: UserRepository,
    H: PasswordHasher,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(repository: Arc<R>, hasher: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            repository,
            hasher,
            clock,
        }
    }

    /// Registers a customer or worker account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Domain`] when a field fails validation
    /// or the role is [`Role::Admin`], and
    /// [`AccountServiceError::Repository`] with
    /// [`UserRepositoryError::DuplicateEmail`] when the address is taken.
    pub async fn register(&self, request: RegisterUserRequest) -> AccountServiceResult<User> {
        let RegisterUserRequest {
            email,
            password,
            role,
            name,
            phone,
            area,
            tools,
        } = request;

        if !role.is_self_registrable() {
            return Err(UserDomainError::RoleNotRegistrable(role).into());
        }

        let email_address = EmailAddress::new(email)?;
        let secret = Password::new(password)?;
        let mut profile = UserProfile::new(name)?.with_tools(tools);
        if let Some(value) = phone {
            profile = profile.with_phone(value);
        }
        if let Some(value) = area {
            profile = profile.with_area(value);
        }

        let digest = self.hasher.hash(&secret)?;
        let user = User::new(email_address, digest, role, profile, &*self.clock)?;
        self.repository.store(&user).await?;
        info!(user_id = %user.id(), role = %user.role(), "registered user");
        Ok(user)
    }

    /// Verifies an e-mail and password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::InvalidCredentials`] when the address is
    /// unknown, malformed, or the password does not match.
    pub async fn authenticate(&self, email: &str, password: &str) -> AccountServiceResult<User> {
        let (Ok(email_address), Ok(secret)) = (EmailAddress::new(email), Password::new(password))
        else {
            return Err(AccountServiceError::InvalidCredentials);
        };

        let Some(user) = self.repository.find_by_email(&email_address).await? else {
            debug!("login attempt for unknown email");
            return Err(AccountServiceError::InvalidCredentials);
        };

        if !self.hasher.verify(&secret, user.password_digest())? {
            warn!(user_id = %user.id(), "login attempt with wrong password");
            return Err(AccountServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Ensures the administrator account exists.
    ///
    /// Returns the existing account when the e-mail is already registered,
    /// whatever its password.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Domain`] when the bootstrap values are
    /// invalid or the address belongs to a non-admin account, and
    /// [`AccountServiceError::Repository`] when persistence fails.
    pub async fn ensure_admin(&self, bootstrap: AdminBootstrap) -> AccountServiceResult<User> {
        let AdminBootstrap {
            email,
            password,
            name,
            phone,
        } = bootstrap;

        let email_address = EmailAddress::new(email)?;
        if let Some(existing) = self.repository.find_by_email(&email_address).await? {
            if existing.role() != Role::Admin {
                return Err(UserDomainError::RoleNotRegistrable(Role::Admin).into());
            }
            debug!(user_id = %existing.id(), "administrator account already present");
            return Ok(existing);
        }

        let secret = Password::new(password)?;
        let mut profile = UserProfile::new(name)?;
        if let Some(value) = phone {
            profile = profile.with_phone(value);
        }
        let digest = self.hasher.hash(&secret)?;
        let admin = User::new(email_address, digest, Role::Admin, profile, &*self.clock)?;
        self.repository.store(&admin).await?;
        info!(user_id = %admin.id(), "created administrator account");
        Ok(admin)
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: UserId) -> AccountServiceResult<Option<User>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns the users referenced by `ids`, skipping unknown identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_many(&self, ids: &[UserId]) -> AccountServiceResult<Vec<User>> {
        Ok(self.repository.find_many(ids).await?)
    }

    /// Returns every worker account, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_workers(&self) -> AccountServiceResult<Vec<User>> {
        Ok(self.repository.list_by_role(Role::Worker).await?)
    }
}
