//! Order lifecycle status and the actions that drive it.

use super::ParseOrderStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status.
///
/// Transitions only move forward: pending, accepted, completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Waiting for a worker.
    Pending,
    /// Claimed by a worker.
    Accepted,
    /// Finished by the assigned worker.
    Completed,
    /// Withdrawn. Readable from storage but never produced by an action.
    Cancelled,
}

impl OrderStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for OrderStatus {
    type Error = ParseOrderStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseOrderStatusError(value.to_owned())),
        }
    }
}

/// Operation an actor attempts against the order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderAction {
    /// Place a new order.
    Create,
    /// Browse pending orders.
    ListAvailable,
    /// Claim a pending order.
    Accept,
    /// Finish an accepted order.
    Complete,
    /// Rate a completed order.
    Rate,
    /// List orders the actor owns or works on.
    ListOwn,
    /// List every order with party details.
    ListAll,
}

impl OrderAction {
    /// Returns a short verb phrase for messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create orders",
            Self::ListAvailable => "list available orders",
            Self::Accept => "accept orders",
            Self::Complete => "complete orders",
            Self::Rate => "rate orders",
            Self::ListOwn => "list own orders",
            Self::ListAll => "list all orders",
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
