//! Password hashing capability.
//!
//! The account service treats hashing as an opaque pair of operations so the
//! digest algorithm can be swapped without touching domain code.

use crate::account::domain::{Password, PasswordDigest};
use thiserror::Error;

/// Computes and verifies password digests.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produces a digest for `password`.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError`] when the digest cannot be computed.
    fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHashError>;

    /// Returns `true` when `password` matches `digest`.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::MalformedDigest`] when the stored digest
    /// was not produced by this hasher.
    fn verify(&self, password: &Password, digest: &PasswordDigest)
    -> Result<bool, PasswordHashError>;
}

/// Errors returned by password hashers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordHashError {
    /// The stored digest does not follow the hasher's encoding.
    #[error("malformed password digest")]
    MalformedDigest,

    /// The hashing primitive rejected its input or parameters.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}
