//! In-memory account adapters.

mod user;

pub use user::InMemoryUserRepository;
