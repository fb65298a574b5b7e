//! Adapter implementations for the session port.

pub mod memory;

pub use memory::{DEFAULT_SESSION_TTL, InMemorySessionStore};
