//! API surface: session resolution, authorization and error mapping.
//!
//! [`MarketplaceApi`] is what a transport layer (HTTP handlers, a CLI)
//! calls. It never exposes password digests and turns every failure into an
//! [`ApiError`] carrying one [`ErrorKind`](crate::error::ErrorKind).

mod error;
mod marketplace;
mod views;

pub use error::{ApiError, ApiResult};
pub use marketplace::MarketplaceApi;
pub use views::{CurrentUser, LoginOutcome, WorkerSummary};

#[cfg(test)]
mod tests;
