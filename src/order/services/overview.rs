//! Read models pairing orders with the people involved.

use crate::account::domain::{Role, User, UserId};
use crate::order::domain::Order;
use serde::Serialize;

/// Contact details of a customer or worker shown alongside an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartySummary {
    id: UserId,
    name: String,
    phone: Option<String>,
    email: Option<String>,
}

impl PartySummary {
    /// Summarizes `user`, exposing the e-mail only when `include_email`.
    #[must_use]
    pub fn from_user(user: &User, include_email: bool) -> Self {
        Self {
            id: user.id(),
            name: user.profile().name().to_owned(),
            phone: user.profile().phone().map(str::to_owned),
            email: include_email.then(|| user.email().as_str().to_owned()),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the phone number, if known.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the e-mail address when the viewer may see it.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// An order together with the parties the viewer is allowed to see.
///
/// Customers see the assigned worker, workers see the customer and admins
/// see both, including e-mail addresses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderOverview {
    order: Order,
    customer: Option<PartySummary>,
    worker: Option<PartySummary>,
}

impl OrderOverview {
    /// Combines an order with its visible parties.
    #[must_use]
    pub const fn new(
        order: Order,
        customer: Option<PartySummary>,
        worker: Option<PartySummary>,
    ) -> Self {
        Self {
            order,
            customer,
            worker,
        }
    }

    /// Returns the order.
    #[must_use]
    pub const fn order(&self) -> &Order {
        &self.order
    }

    /// Returns the customer summary, if visible.
    #[must_use]
    pub const fn customer(&self) -> Option<&PartySummary> {
        self.customer.as_ref()
    }

    /// Returns the worker summary, if visible and assigned.
    #[must_use]
    pub const fn worker(&self) -> Option<&PartySummary> {
        self.worker.as_ref()
    }

    /// Consumes the overview, returning the order.
    #[must_use]
    pub fn into_order(self) -> Order {
        self.order
    }
}

/// Which parties a viewer of the given role sees on each order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PartyVisibility {
    pub(crate) customer: bool,
    pub(crate) worker: bool,
    pub(crate) email: bool,
}

impl PartyVisibility {
    pub(crate) const fn for_viewer(role: Role) -> Self {
        match role {
            Role::Customer => Self {
                customer: false,
                worker: true,
                email: false,
            },
            Role::Worker => Self {
                customer: true,
                worker: false,
                email: false,
            },
            Role::Admin => Self {
                customer: true,
                worker: true,
                email: true,
            },
        }
    }
}
