//! Application services for the order lifecycle.

mod lifecycle;
mod overview;

pub use lifecycle::{
    CreateOrderRequest, OrderLifecycleError, OrderLifecycleResult, OrderLifecycleService,
};
pub use overview::{OrderOverview, PartySummary};
