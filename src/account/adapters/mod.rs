//! Adapter implementations for account ports.

pub mod memory;
pub mod postgres;

mod argon2id;

pub use argon2id::Argon2PasswordHasher;
