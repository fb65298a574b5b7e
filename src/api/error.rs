//! Caller-facing error type.

use crate::account::services::AccountServiceError;
use crate::error::ErrorKind;
use crate::order::services::OrderLifecycleError;
use crate::session::SessionStoreError;
use std::fmt;
use tracing::error;

const STORAGE_MESSAGE: &str = "the service is temporarily unavailable";

/// Failure returned by every [`MarketplaceApi`](super::MarketplaceApi)
/// operation.
///
/// Storage failures carry a generic message; their cause is logged instead
/// of being shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
}

impl ApiError {
    /// Creates an error of `kind` with a caller-visible message.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Error for a missing, unknown or expired session.
    #[must_use]
    pub fn authentication_required() -> Self {
        Self::new(ErrorKind::AuthenticationRequired, "login required")
    }

    fn classified(kind: ErrorKind, cause: &dyn std::error::Error) -> Self {
        if kind == ErrorKind::StorageFailure {
            error!(error = %cause, "storage failure");
            return Self::new(kind, STORAGE_MESSAGE);
        }
        Self::new(kind, cause.to_string())
    }

    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the caller-visible message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// Returns `true` when the same request may succeed if retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<AccountServiceError> for ApiError {
    fn from(err: AccountServiceError) -> Self {
        Self::classified(err.kind(), &err)
    }
}

impl From<OrderLifecycleError> for ApiError {
    fn from(err: OrderLifecycleError) -> Self {
        Self::classified(err.kind(), &err)
    }
}

impl From<SessionStoreError> for ApiError {
    fn from(err: SessionStoreError) -> Self {
        Self::classified(ErrorKind::StorageFailure, &err)
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
