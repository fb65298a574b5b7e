//! Yardwork: a marketplace for yard-work orders.
//!
//! Customers place orders for mowing, tree trimming, fence painting or other
//! work; workers accept and complete them; customers rate the result; admins
//! oversee every order and worker.
//!
//! # Architecture
//!
//! Yardwork follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`account`]: Registration, credentials and worker lookup
//! - [`order`]: Order placement, pricing and lifecycle transitions
//! - [`session`]: Login sessions resolving to an authenticated actor
//! - [`api`]: Session-authenticated entry points and error mapping
//! - [`config`]: TOML deployment configuration
//! - [`observability`]: Tracing subscriber setup
//! - [`storage`]: `PostgreSQL` pool and schema installation

pub mod account;
pub mod api;
pub mod config;
pub mod error;
pub mod observability;
pub mod order;
pub mod session;
pub mod storage;

#[cfg(test)]
mod tests;
