//! Domain model for marketplace accounts.
//!
//! Users carry an immutable role, a unique e-mail login and an opaque
//! password digest. The [`Actor`] type is the resolved identity every other
//! service receives.

mod credentials;
mod email;
mod error;
mod ids;
mod role;
mod user;

pub use credentials::{Password, PasswordDigest};
pub use email::EmailAddress;
pub use error::{ParseRoleError, UserDomainError};
pub use ids::UserId;
pub use role::Role;
pub use user::{Actor, PersistedUserData, User, UserProfile};
