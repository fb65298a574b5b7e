//! Error types for order validation, transitions and parsing.

use super::{OrderAction, OrderId, OrderStatus};
use crate::account::domain::Role;
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing or transitioning orders.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderDomainError {
    /// The work type is empty after trimming.
    #[error("work type must not be empty")]
    EmptyWorkType,

    /// The address is empty after trimming.
    #[error("address must not be empty")]
    EmptyAddress,

    /// A coordinate is NaN or infinite.
    #[error("coordinate {0} is not a finite number")]
    NonFiniteCoordinate(String),

    /// More photo references were attached than an order may hold.
    #[error("at most {max} photos may be attached, got {actual}")]
    TooManyPhotos {
        /// Maximum number of references accepted.
        max: usize,
        /// Number of references supplied.
        actual: usize,
    },

    /// A photo reference is empty after trimming.
    #[error("photo reference must not be empty")]
    EmptyPhotoRef,

    /// The rating lies outside `[1, 5]`.
    #[error("rating {0} is outside [1, 5]")]
    RatingOutOfRange(i64),

    /// The actor's role may not perform the action.
    #[error("role {role} may not {action}")]
    RoleNotPermitted {
        /// Role of the acting user.
        role: Role,
        /// Attempted action.
        action: OrderAction,
    },

    /// A worker tried to complete an order assigned to someone else.
    #[error("order {0} is not assigned to the acting worker")]
    NotAssignedWorker(OrderId),

    /// A customer tried to rate an order they do not own.
    #[error("order {0} does not belong to the acting customer")]
    NotOwner(OrderId),

    /// A worker tried to accept an order that is no longer pending.
    #[error("order {0} is no longer available")]
    NoLongerAvailable(OrderId),

    /// The order is not in the status the action requires.
    #[error("order {order_id} is {actual}, expected {expected}")]
    UnexpectedStatus {
        /// Order being transitioned.
        order_id: OrderId,
        /// Status the action requires.
        expected: OrderStatus,
        /// Status the order is in.
        actual: OrderStatus,
    },

    /// The order already carries a rating.
    #[error("order {0} has already been rated")]
    AlreadyRated(OrderId),
}

impl OrderDomainError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyWorkType
            | Self::EmptyAddress
            | Self::NonFiniteCoordinate(_)
            | Self::TooManyPhotos { .. }
            | Self::EmptyPhotoRef
            | Self::RatingOutOfRange(_) => ErrorKind::ValidationFailed,
            Self::RoleNotPermitted { .. } | Self::NotAssignedWorker(_) | Self::NotOwner(_) => {
                ErrorKind::AuthorizationDenied
            }
            Self::NoLongerAvailable(_) | Self::UnexpectedStatus { .. } | Self::AlreadyRated(_) => {
                ErrorKind::ConflictState
            }
        }
    }
}

/// Error returned while parsing order statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(pub String);

/// Error returned while parsing stored work types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown work type: {0}")]
pub struct ParseWorkTypeError(pub String);
