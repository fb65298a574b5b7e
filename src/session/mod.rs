//! Login sessions: opaque tokens resolved to an authenticated [`Actor`].
//!
//! [`Actor`]: crate::account::domain::Actor

pub mod adapters;
pub mod domain;
pub mod ports;

pub use domain::{Session, SessionToken};
pub use ports::{SessionStore, SessionStoreError, SessionStoreResult};

#[cfg(test)]
mod tests;
