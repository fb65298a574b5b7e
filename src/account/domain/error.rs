//! Error types for account domain validation and parsing.

use super::Role;
use thiserror::Error;

/// Errors returned while constructing account domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The e-mail address is empty after trimming.
    #[error("email address must not be empty")]
    EmptyEmail,

    /// The e-mail address is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The display name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyName,

    /// The supplied password is empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// Tool labels were supplied for an account that is not a worker.
    #[error("only worker accounts may list owned tools, got role {0}")]
    ToolsRequireWorker(Role),

    /// Self-service registration requested a role it may not grant.
    #[error("role {0} cannot be self-registered")]
    RoleNotRegistrable(Role),
}

/// Error returned while parsing user roles from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user role: {0}")]
pub struct ParseRoleError(pub String);
