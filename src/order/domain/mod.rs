//! Domain model for yard-work orders.
//!
//! An [`Order`] moves forward through pending, accepted and completed, and
//! may then receive a single [`Review`]. Each transition checks the acting
//! role and returns the [`TransitionGuard`] the repository must apply when
//! writing the change.

mod error;
mod ids;
mod location;
mod order;
mod photo;
mod pricing;
mod rating;
mod status;
mod work_type;

pub use error::{OrderDomainError, ParseOrderStatusError, ParseWorkTypeError};
pub use ids::OrderId;
pub use location::{Address, Coordinates};
pub use order::{Order, OrderDetails, PersistedOrderData, TransitionGuard, require_role};
pub use photo::{MAX_PHOTOS, PhotoRef, PhotoRefs};
pub use pricing::{EstimatedPrice, PriceTable};
pub use rating::{MAX_RATING, MIN_RATING, Rating, Review};
pub use status::{OrderAction, OrderStatus};
pub use work_type::WorkType;
