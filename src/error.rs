//! Caller-visible error classification shared by every service.
//!
//! Each service error maps onto exactly one [`ErrorKind`], which the API
//! surface turns into a status code and message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a failed marketplace operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No valid session accompanied the request.
    AuthenticationRequired,
    /// The session is valid but the actor lacks the role or ownership.
    AuthorizationDenied,
    /// A required field is missing or malformed.
    ValidationFailed,
    /// The requested transition is illegal from the current state.
    ConflictState,
    /// The referenced order or user does not exist.
    NotFound,
    /// The underlying persistence layer failed.
    StorageFailure,
}

impl ErrorKind {
    /// Returns the canonical snake-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthenticationRequired => "authentication_required",
            Self::AuthorizationDenied => "authorization_denied",
            Self::ValidationFailed => "validation_failed",
            Self::ConflictState => "conflict_state",
            Self::NotFound => "not_found",
            Self::StorageFailure => "storage_failure",
        }
    }

    /// Returns the HTTP status code conventionally used for this kind.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::AuthenticationRequired => 401,
            Self::AuthorizationDenied => 403,
            Self::ValidationFailed => 400,
            Self::ConflictState => 409,
            Self::NotFound => 404,
            Self::StorageFailure => 503,
        }
    }

    /// Returns `true` when a caller may retry the same request unchanged.
    ///
    /// Only storage failures are potentially transient.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::StorageFailure)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
