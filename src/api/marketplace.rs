//! Session-authenticated entry points for every marketplace operation.

use super::{
    error::{ApiError, ApiResult},
    views::{CurrentUser, LoginOutcome, WorkerSummary},
};
use crate::account::{
    domain::{Actor, Role, UserId},
    ports::{PasswordHasher, UserRepository},
    services::{AccountService, RegisterUserRequest},
};
use crate::error::ErrorKind;
use crate::order::{
    domain::{EstimatedPrice, Order, OrderId},
    ports::OrderRepository,
    services::{CreateOrderRequest, OrderLifecycleService, OrderOverview},
};
use crate::session::{SessionStore, SessionToken};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// Facade resolving sessions and delegating to the account and order
/// services.
///
/// Share one instance behind an [`Arc`] across request handlers.
///
/// Every method that takes a [`SessionToken`] fails with
/// [`ErrorKind::AuthenticationRequired`] when the token is empty, unknown,
/// revoked or expired.
pub struct MarketplaceApi<U, H, O, S, C>
where
    U: UserRepository,
    H: PasswordHasher,
    O: OrderRepository,
    S: SessionStore,
    C: Clock + Send + Sync,
{
    accounts: AccountService<U, H, C>,
    orders: OrderLifecycleService<O, U, C>,
    sessions: Arc<S>,
}

impl<U, H, O, S, C> MarketplaceApi<U, H, O, S, C>
where
    U: UserRepository,
    H: PasswordHasher,
    O: OrderRepository,
    S: SessionStore,
    C: Clock + Send + Sync,
{
    /// Creates the facade.
    #[must_use]
    pub const fn new(
        accounts: AccountService<U, H, C>,
        orders: OrderLifecycleService<O, U, C>,
        sessions: Arc<S>,
    ) -> Self {
        Self {
            accounts,
            orders,
            sessions,
        }
    }

    /// Registers a customer or worker account.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ValidationFailed`] for invalid fields or an
    /// admin role and [`ErrorKind::ConflictState`] for a taken e-mail.
    pub async fn register(&self, request: RegisterUserRequest) -> ApiResult<UserId> {
        let user = self.accounts.register(request).await?;
        Ok(user.id())
    }

    /// Checks credentials and opens a session.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AuthenticationRequired`] for an unknown e-mail
    /// or wrong password.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginOutcome> {
        let user = self.accounts.authenticate(email, password).await?;
        let actor = user.actor();
        let token = self.sessions.issue(actor).await?;
        info!(user_id = %actor.user_id(), role = %actor.role(), "logged in");
        Ok(LoginOutcome::new(
            token,
            actor,
            user.profile().name().to_owned(),
        ))
    }

    /// Ends the session. Unknown tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::StorageFailure`] when the session store fails.
    pub async fn logout(&self, token: &SessionToken) -> ApiResult<()> {
        self.sessions.revoke(token).await?;
        debug!("logged out");
        Ok(())
    }

    /// Returns the identity behind `token`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AuthenticationRequired`] when the session is not
    /// valid or its user no longer exists.
    pub async fn current_actor(&self, token: &SessionToken) -> ApiResult<CurrentUser> {
        let actor = self.authenticate(token).await?;
        let user = self
            .accounts
            .find_by_id(actor.user_id())
            .await?
            .ok_or_else(ApiError::authentication_required)?;
        Ok(CurrentUser::new(actor, user.profile().name().to_owned()))
    }

    /// Returns the price a new order of `work_type` would be quoted.
    #[must_use]
    pub fn estimate_price(&self, work_type: &str) -> EstimatedPrice {
        self.orders.quote(work_type)
    }

    /// Places an order as the session's customer.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AuthorizationDenied`] for non-customers and
    /// [`ErrorKind::ValidationFailed`] for invalid fields.
    pub async fn create_order(
        &self,
        token: &SessionToken,
        request: CreateOrderRequest,
    ) -> ApiResult<Order> {
        let actor = self.authenticate(token).await?;
        Ok(self.orders.create(actor, request).await?)
    }

    /// Lists pending orders for the session's worker.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AuthorizationDenied`] for non-workers.
    pub async fn list_available_orders(
        &self,
        token: &SessionToken,
    ) -> ApiResult<Vec<OrderOverview>> {
        let actor = self.authenticate(token).await?;
        Ok(self.orders.list_available(actor).await?)
    }

    /// Accepts a pending order as the session's worker.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConflictState`] when the order is no longer
    /// pending and [`ErrorKind::NotFound`] for an unknown order.
    pub async fn accept_order(&self, token: &SessionToken, order_id: OrderId) -> ApiResult<Order> {
        let actor = self.authenticate(token).await?;
        Ok(self.orders.accept(actor, order_id).await?)
    }

    /// Completes an accepted order as its assigned worker.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AuthorizationDenied`] when the session's worker
    /// is not assigned, [`ErrorKind::ConflictState`] when the order is not
    /// accepted and [`ErrorKind::NotFound`] for an unknown order.
    pub async fn complete_order(
        &self,
        token: &SessionToken,
        order_id: OrderId,
    ) -> ApiResult<Order> {
        let actor = self.authenticate(token).await?;
        Ok(self.orders.complete(actor, order_id).await?)
    }

    /// Rates a completed order as its owning customer.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ValidationFailed`] for a rating outside
    /// `[1, 5]`, [`ErrorKind::AuthorizationDenied`] for someone else's
    /// order and [`ErrorKind::ConflictState`] when the order is not
    /// completed or already rated.
    pub async fn rate_order(
        &self,
        token: &SessionToken,
        order_id: OrderId,
        rating: i64,
        feedback: Option<String>,
    ) -> ApiResult<Order> {
        let actor = self.authenticate(token).await?;
        Ok(self.orders.rate(actor, order_id, rating, feedback).await?)
    }

    /// Lists the orders the session's customer placed or worker accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AuthorizationDenied`] for admins.
    pub async fn list_my_orders(&self, token: &SessionToken) -> ApiResult<Vec<OrderOverview>> {
        let actor = self.authenticate(token).await?;
        Ok(self.orders.list_own(actor).await?)
    }

    /// Lists every order with customer and worker details.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AuthorizationDenied`] for non-admins.
    pub async fn admin_list_orders(&self, token: &SessionToken) -> ApiResult<Vec<OrderOverview>> {
        let actor = self.authenticate(token).await?;
        Ok(self.orders.list_all(actor).await?)
    }

    /// Lists every worker account, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AuthorizationDenied`] for non-admins.
    pub async fn admin_list_workers(&self, token: &SessionToken) -> ApiResult<Vec<WorkerSummary>> {
        let actor = self.authenticate(token).await?;
        if actor.role() != Role::Admin {
            return Err(ApiError::new(
                ErrorKind::AuthorizationDenied,
                format!("role {} may not list workers", actor.role()),
            ));
        }
        let workers = self.accounts.list_workers().await?;
        Ok(workers.iter().map(WorkerSummary::from).collect())
    }

    async fn authenticate(&self, token: &SessionToken) -> ApiResult<Actor> {
        if token.as_str().is_empty() {
            return Err(ApiError::authentication_required());
        }
        self.sessions
            .resolve(token)
            .await?
            .ok_or_else(ApiError::authentication_required)
    }
}
