//! Service layer for placing orders and driving them through their
//! lifecycle.

use super::overview::{OrderOverview, PartySummary, PartyVisibility};
use crate::account::{
    domain::{Actor, Role, User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use crate::error::ErrorKind;
use crate::order::{
    domain::{
        Address, Coordinates, EstimatedPrice, Order, OrderAction, OrderDetails, OrderDomainError,
        OrderId, OrderStatus, PhotoRefs, PriceTable, Rating, TransitionGuard, WorkType,
        require_role,
    },
    ports::{OrderRepository, OrderRepositoryError},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for placing an order, as received from a client.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderRequest {
    work_type: String,
    address: String,
    description: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    has_tools: bool,
    photo_refs: Vec<String>,
}

impl CreateOrderRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(work_type: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            work_type: work_type.into(),
            address: address.into(),
            description: None,
            latitude: None,
            longitude: None,
            has_tools: false,
            photo_refs: Vec::new(),
        }
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the job-site coordinates.
    #[must_use]
    pub const fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Sets the latitude alone, as a form might submit it.
    #[must_use]
    pub const fn with_latitude(mut self, latitude: f64) -> Self {
        self.latitude = Some(latitude);
        self
    }

    /// Sets the longitude alone, as a form might submit it.
    #[must_use]
    pub const fn with_longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }

    /// Records whether the customer can lend tools on site.
    #[must_use]
    pub const fn with_tools_available(mut self, has_tools: bool) -> Self {
        self.has_tools = has_tools;
        self
    }

    /// Sets the stored-upload references of attached photos.
    #[must_use]
    pub fn with_photo_refs(mut self, refs: impl IntoIterator<Item = String>) -> Self {
        self.photo_refs = refs.into_iter().collect();
        self
    }

    fn into_details(self) -> Result<OrderDetails, OrderDomainError> {
        if self.work_type.trim().is_empty() {
            return Err(OrderDomainError::EmptyWorkType);
        }
        let work_type = WorkType::from_client(&self.work_type);
        let address = Address::new(self.address)?;
        let photos = PhotoRefs::new(self.photo_refs)?;

        let mut details = OrderDetails::new(work_type, address)
            .with_tools_available(self.has_tools)
            .with_photos(photos);
        if let Some(description) = self.description {
            details = details.with_description(description);
        }
        Ok(details.with_coordinates(Coordinates::new(self.latitude, self.longitude)?))
    }
}

/// Service-level errors for order lifecycle operations.
#[derive(Debug, Error)]
pub enum OrderLifecycleError {
    /// Validation, authorization or state rule violated.
    #[error(transparent)]
    Domain(#[from] OrderDomainError),
    /// Order repository operation failed.
    #[error(transparent)]
    Repository(#[from] OrderRepositoryError),
    /// User lookup for party details failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// The referenced order does not exist.
    #[error("order not found: {0}")]
    NotFound(OrderId),
}

impl OrderLifecycleError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::NotFound(_) | Self::Repository(OrderRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Repository(
                OrderRepositoryError::StaleTransition { .. }
                | OrderRepositoryError::DuplicateOrder(_),
            ) => ErrorKind::ConflictState,
            Self::Repository(_) | Self::Users(_) => ErrorKind::StorageFailure,
        }
    }
}

/// Result type for order lifecycle service operations.
pub type OrderLifecycleResult<T> = Result<T, OrderLifecycleError>;

/// Order lifecycle orchestration service.
#[derive(Clone)]
pub struct OrderLifecycleService<R, U, C>
where
    R: OrderRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    orders: Arc<R>,
    users: Arc<U>,
    prices: PriceTable,
    clock: Arc<C>,
}

impl<R, U, C> OrderLifecycleService<R, U, C>
where
    R: OrderRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new order lifecycle service.
    #[must_use]
    pub const fn new(orders: Arc<R>, users: Arc<U>, prices: PriceTable, clock: Arc<C>) -> Self {
        Self {
            orders,
            users,
            prices,
            clock,
        }
    }

    /// Returns the price a new order of `work_type` would be quoted.
    ///
    /// Unrecognised work types are quoted at the rate for
    /// [`WorkType::Other`].
    #[must_use]
    pub fn quote(&self, work_type: &str) -> EstimatedPrice {
        self.prices.estimate(WorkType::from_client(work_type))
    }

    /// Places a pending order for the acting customer.
    ///
    /// # Errors
    ///
    /// Returns [`OrderLifecycleError::Domain`] when the actor is not a
    /// customer or a field fails validation, and
    /// [`OrderLifecycleError::Repository`] when persistence fails.
    pub async fn create(
        &self,
        actor: Actor,
        request: CreateOrderRequest,
    ) -> OrderLifecycleResult<Order> {
        require_role(actor, Role::Customer, OrderAction::Create)?;
        let details = request.into_details()?;
        let order = Order::new(actor, details, &self.prices, &*self.clock)?;
        self.orders.store(&order).await?;
        info!(
            order_id = %order.id(),
            customer_id = %actor.user_id(),
            work_type = %order.work_type(),
            estimated_price = %order.estimated_price(),
            "order created"
        );
        Ok(order)
    }

    /// Lists every pending order for a worker, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`OrderLifecycleError::Domain`] when the actor is not a
    /// worker.
    pub async fn list_available(&self, actor: Actor) -> OrderLifecycleResult<Vec<OrderOverview>> {
        require_role(actor, Role::Worker, OrderAction::ListAvailable)?;
        let orders = self.orders.list_by_status(OrderStatus::Pending).await?;
        debug!(worker_id = %actor.user_id(), count = orders.len(), "listed available orders");
        self.with_parties(orders, actor.role()).await
    }

    /// Assigns a pending order to the acting worker.
    ///
    /// Of two workers racing for the same order exactly one succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::NoLongerAvailable`] when the order is not
    /// pending (including losing a race), [`OrderLifecycleError::NotFound`]
    /// for an unknown order and [`OrderDomainError::RoleNotPermitted`] for
    /// non-workers.
    pub async fn accept(&self, actor: Actor, order_id: OrderId) -> OrderLifecycleResult<Order> {
        require_role(actor, Role::Worker, OrderAction::Accept)?;
        self.transition(order_id, OrderAction::Accept, |order, clock| {
            order.accept(actor, clock)
        })
        .await
    }

    /// Marks an accepted order as completed by its assigned worker.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::NotAssignedWorker`] when the actor is not
    /// the assigned worker, [`OrderDomainError::UnexpectedStatus`] when the
    /// order is not accepted and [`OrderLifecycleError::NotFound`] for an
    /// unknown order.
    pub async fn complete(&self, actor: Actor, order_id: OrderId) -> OrderLifecycleResult<Order> {
        require_role(actor, Role::Worker, OrderAction::Complete)?;
        self.transition(order_id, OrderAction::Complete, |order, clock| {
            order.complete(actor, clock)
        })
        .await
    }

    /// Attaches the owning customer's rating and feedback to a completed
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::RatingOutOfRange`] for ratings outside
    /// `[1, 5]`, [`OrderDomainError::NotOwner`] when the actor does not own
    /// the order, [`OrderDomainError::UnexpectedStatus`] or
    /// [`OrderDomainError::AlreadyRated`] when the order cannot take a rating
    /// and [`OrderLifecycleError::NotFound`] for an unknown order.
    pub async fn rate(
        &self,
        actor: Actor,
        order_id: OrderId,
        rating: i64,
        feedback: Option<String>,
    ) -> OrderLifecycleResult<Order> {
        require_role(actor, Role::Customer, OrderAction::Rate)?;
        let stars = Rating::new(rating)?;
        self.transition(order_id, OrderAction::Rate, move |order, clock| {
            order.rate(actor, stars, feedback, clock)
        })
        .await
    }

    /// Lists the actor's own orders, newest first.
    ///
    /// Customers see the orders they placed; workers see the orders assigned
    /// to them.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::RoleNotPermitted`] for admins.
    pub async fn list_own(&self, actor: Actor) -> OrderLifecycleResult<Vec<OrderOverview>> {
        let orders = match actor.role() {
            Role::Customer => self.orders.list_by_customer(actor.user_id()).await?,
            Role::Worker => self.orders.list_by_worker(actor.user_id()).await?,
            Role::Admin => {
                return Err(OrderDomainError::RoleNotPermitted {
                    role: actor.role(),
                    action: OrderAction::ListOwn,
                }
                .into());
            }
        };
        debug!(user_id = %actor.user_id(), count = orders.len(), "listed own orders");
        self.with_parties(orders, actor.role()).await
    }

    /// Lists every order with customer and worker details for an admin.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::RoleNotPermitted`] for non-admins.
    pub async fn list_all(&self, actor: Actor) -> OrderLifecycleResult<Vec<OrderOverview>> {
        require_role(actor, Role::Admin, OrderAction::ListAll)?;
        let orders = self.orders.list_all().await?;
        debug!(admin_id = %actor.user_id(), count = orders.len(), "listed all orders");
        self.with_parties(orders, actor.role()).await
    }

    async fn transition<F>(
        &self,
        order_id: OrderId,
        action: OrderAction,
        apply: F,
    ) -> OrderLifecycleResult<Order>
    where
        F: FnOnce(&mut Order, &C) -> Result<TransitionGuard, OrderDomainError> + Send,
    {
        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(OrderLifecycleError::NotFound(order_id))?;

        let guard = apply(&mut order, &*self.clock).inspect_err(|err| {
            debug!(%order_id, %action, error = %err, "transition rejected");
        })?;

        match self.orders.compare_and_update(&order, guard).await {
            Ok(()) => {
                info!(%order_id, %action, status = %order.status(), "order transitioned");
                Ok(order)
            }
            Err(OrderRepositoryError::StaleTransition { .. }) if action == OrderAction::Accept => {
                warn!(%order_id, "order taken by another worker");
                Err(OrderDomainError::NoLongerAvailable(order_id).into())
            }
            Err(err) => {
                warn!(%order_id, %action, error = %err, "transition not written");
                Err(err.into())
            }
        }
    }

    async fn with_parties(
        &self,
        orders: Vec<Order>,
        viewer: Role,
    ) -> OrderLifecycleResult<Vec<OrderOverview>> {
        let visibility = PartyVisibility::for_viewer(viewer);
        let mut ids: Vec<UserId> = Vec::new();
        for order in &orders {
            if visibility.customer {
                ids.push(order.customer_id());
            }
            if visibility.worker
                && let Some(worker_id) = order.worker_id()
            {
                ids.push(worker_id);
            }
        }
        ids.sort_unstable();
        ids.dedup();

        let users: HashMap<UserId, User> = if ids.is_empty() {
            HashMap::new()
        } else {
            self.users
                .find_many(&ids)
                .await?
                .into_iter()
                .map(|user| (user.id(), user))
                .collect()
        };
        let summarize = |id: UserId| {
            users
                .get(&id)
                .map(|user| PartySummary::from_user(user, visibility.email))
        };

        Ok(orders
            .into_iter()
            .map(|order| {
                let customer = if visibility.customer {
                    summarize(order.customer_id())
                } else {
                    None
                };
                let worker = if visibility.worker {
                    order.worker_id().and_then(summarize)
                } else {
                    None
                };
                OrderOverview::new(order, customer, worker)
            })
            .collect())
    }
}
