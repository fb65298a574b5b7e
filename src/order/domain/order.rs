//! Order aggregate root and lifecycle transitions.

use super::{
    Address, Coordinates, EstimatedPrice, OrderAction, OrderDomainError, OrderId, OrderStatus,
    PhotoRefs, PriceTable, Rating, Review, WorkType,
};
use crate::account::domain::{Actor, Role, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated customer input for a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    work_type: WorkType,
    address: Address,
    description: Option<String>,
    coordinates: Coordinates,
    has_tools: bool,
    photos: PhotoRefs,
}

impl OrderDetails {
    /// Creates details with the required fields.
    #[must_use]
    pub fn new(work_type: WorkType, address: Address) -> Self {
        Self {
            work_type,
            address,
            description: None,
            coordinates: Coordinates::default(),
            has_tools: false,
            photos: PhotoRefs::default(),
        }
    }

    /// Sets the free-text description. Blank values are ignored.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let raw = description.into();
        let trimmed = raw.trim();
        self.description = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Sets the job-site coordinates.
    #[must_use]
    pub const fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = coordinates;
        self
    }

    /// Records whether the customer can lend tools on site.
    #[must_use]
    pub const fn with_tools_available(mut self, has_tools: bool) -> Self {
        self.has_tools = has_tools;
        self
    }

    /// Attaches photo references.
    #[must_use]
    pub fn with_photos(mut self, photos: PhotoRefs) -> Self {
        self.photos = photos;
        self
    }
}

/// Precondition a stored order must still satisfy for a transition to be
/// written.
///
/// Repositories apply the guard atomically with the write, so of two racing
/// transitions from the same state only one lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionGuard {
    expected_status: OrderStatus,
    requires_unrated: bool,
}

impl TransitionGuard {
    /// Requires the stored order to be in `status`.
    #[must_use]
    pub const fn expecting(status: OrderStatus) -> Self {
        Self {
            expected_status: status,
            requires_unrated: false,
        }
    }

    /// Additionally requires the stored order to carry no rating.
    #[must_use]
    pub const fn unrated(mut self) -> Self {
        self.requires_unrated = true;
        self
    }

    /// Returns the status the stored order must be in.
    #[must_use]
    pub const fn expected_status(self) -> OrderStatus {
        self.expected_status
    }

    /// Returns `true` when the stored order must carry no rating.
    #[must_use]
    pub const fn requires_unrated(self) -> bool {
        self.requires_unrated
    }

    /// Returns `true` when `stored` satisfies the guard.
    #[must_use]
    pub fn admits(self, stored: &Order) -> bool {
        stored.status == self.expected_status
            && !(self.requires_unrated && stored.review.is_some())
    }
}

/// Order aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: UserId,
    worker_id: Option<UserId>,
    work_type: WorkType,
    description: Option<String>,
    address: Address,
    coordinates: Coordinates,
    has_tools: bool,
    photos: PhotoRefs,
    status: OrderStatus,
    estimated_price: EstimatedPrice,
    review: Option<Review>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted order aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedOrderData {
    /// Persisted order identifier.
    pub id: OrderId,
    /// Owning customer.
    pub customer_id: UserId,
    /// Assigned worker, if accepted.
    pub worker_id: Option<UserId>,
    /// Requested work type.
    pub work_type: WorkType,
    /// Free-text description, if any.
    pub description: Option<String>,
    /// Job-site address.
    pub address: Address,
    /// Job-site coordinates; either half may be absent.
    pub coordinates: Coordinates,
    /// Whether the customer lends tools.
    pub has_tools: bool,
    /// Attached photo references.
    pub photos: PhotoRefs,
    /// Persisted lifecycle status.
    pub status: OrderStatus,
    /// Price quoted at creation.
    pub estimated_price: EstimatedPrice,
    /// Customer review, if rated.
    pub review: Option<Review>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Places a new pending order on behalf of a customer.
    ///
    /// The price is quoted from `prices` and never changes afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::RoleNotPermitted`] when the actor is not a
    /// customer.
    pub fn new(
        actor: Actor,
        details: OrderDetails,
        prices: &PriceTable,
        clock: &impl Clock,
    ) -> Result<Self, OrderDomainError> {
        require_role(actor, Role::Customer, OrderAction::Create)?;
        let timestamp = clock.utc();
        let OrderDetails {
            work_type,
            address,
            description,
            coordinates,
            has_tools,
            photos,
        } = details;

        Ok(Self {
            id: OrderId::new(),
            customer_id: actor.user_id(),
            worker_id: None,
            work_type,
            description,
            address,
            coordinates,
            has_tools,
            photos,
            status: OrderStatus::Pending,
            estimated_price: prices.estimate(work_type),
            review: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an order from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedOrderData) -> Self {
        Self {
            id: data.id,
            customer_id: data.customer_id,
            worker_id: data.worker_id,
            work_type: data.work_type,
            description: data.description,
            address: data.address,
            coordinates: data.coordinates,
            has_tools: data.has_tools,
            photos: data.photos,
            status: data.status,
            estimated_price: data.estimated_price,
            review: data.review,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the order identifier.
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the owning customer.
    #[must_use]
    pub const fn customer_id(&self) -> UserId {
        self.customer_id
    }

    /// Returns the assigned worker, if the order has been accepted.
    #[must_use]
    pub const fn worker_id(&self) -> Option<UserId> {
        self.worker_id
    }

    /// Returns the requested work type.
    #[must_use]
    pub const fn work_type(&self) -> WorkType {
        self.work_type
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the job-site address.
    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// Returns the job-site coordinates.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Returns `true` when the customer lends tools on site.
    #[must_use]
    pub const fn has_tools(&self) -> bool {
        self.has_tools
    }

    /// Returns the attached photo references.
    #[must_use]
    pub const fn photos(&self) -> &PhotoRefs {
        &self.photos
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the price quoted at creation.
    #[must_use]
    pub const fn estimated_price(&self) -> EstimatedPrice {
        self.estimated_price
    }

    /// Returns the customer review, if rated.
    #[must_use]
    pub const fn review(&self) -> Option<&Review> {
        self.review.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Assigns a pending order to the acting worker.
    ///
    /// Returns the guard the stored order must satisfy when the change is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::RoleNotPermitted`] for non-workers and
    /// [`OrderDomainError::NoLongerAvailable`] when the order is not pending.
    pub fn accept(
        &mut self,
        actor: Actor,
        clock: &impl Clock,
    ) -> Result<TransitionGuard, OrderDomainError> {
        require_role(actor, Role::Worker, OrderAction::Accept)?;
        if self.status != OrderStatus::Pending {
            return Err(OrderDomainError::NoLongerAvailable(self.id));
        }
        self.worker_id = Some(actor.user_id());
        self.status = OrderStatus::Accepted;
        self.touch(clock);
        Ok(TransitionGuard::expecting(OrderStatus::Pending))
    }

    /// Marks an accepted order as completed by its assigned worker.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::RoleNotPermitted`] for non-workers,
    /// [`OrderDomainError::NotAssignedWorker`] when the actor is not the
    /// stored worker, and [`OrderDomainError::UnexpectedStatus`] when the
    /// order is not accepted.
    pub fn complete(
        &mut self,
        actor: Actor,
        clock: &impl Clock,
    ) -> Result<TransitionGuard, OrderDomainError> {
        require_role(actor, Role::Worker, OrderAction::Complete)?;
        if self.worker_id != Some(actor.user_id()) {
            return Err(OrderDomainError::NotAssignedWorker(self.id));
        }
        self.require_status(OrderStatus::Accepted)?;
        self.status = OrderStatus::Completed;
        self.touch(clock);
        Ok(TransitionGuard::expecting(OrderStatus::Accepted))
    }

    /// Attaches the owning customer's review to a completed order.
    ///
    /// The status stays [`OrderStatus::Completed`]; the first review is
    /// final.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::RoleNotPermitted`] for non-customers,
    /// [`OrderDomainError::NotOwner`] when the actor does not own the order,
    /// [`OrderDomainError::UnexpectedStatus`] when the order is not
    /// completed, and [`OrderDomainError::AlreadyRated`] on a second review.
    pub fn rate(
        &mut self,
        actor: Actor,
        rating: Rating,
        feedback: Option<String>,
        clock: &impl Clock,
    ) -> Result<TransitionGuard, OrderDomainError> {
        require_role(actor, Role::Customer, OrderAction::Rate)?;
        if self.customer_id != actor.user_id() {
            return Err(OrderDomainError::NotOwner(self.id));
        }
        self.require_status(OrderStatus::Completed)?;
        if self.review.is_some() {
            return Err(OrderDomainError::AlreadyRated(self.id));
        }
        self.review = Some(Review::new(rating, feedback));
        self.touch(clock);
        Ok(TransitionGuard::expecting(OrderStatus::Completed).unrated())
    }

    fn require_status(&self, expected: OrderStatus) -> Result<(), OrderDomainError> {
        if self.status == expected {
            return Ok(());
        }
        Err(OrderDomainError::UnexpectedStatus {
            order_id: self.id,
            expected,
            actual: self.status,
        })
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Fails unless `actor` holds `role`.
///
/// # Errors
///
/// Returns [`OrderDomainError::RoleNotPermitted`] naming `action`.
pub fn require_role(
    actor: Actor,
    role: Role,
    action: OrderAction,
) -> Result<(), OrderDomainError> {
    if actor.role() == role {
        return Ok(());
    }
    Err(OrderDomainError::RoleNotPermitted {
        role: actor.role(),
        action,
    })
}
