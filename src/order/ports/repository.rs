//! Repository port for order persistence and role-scoped queries.

use crate::account::domain::UserId;
use crate::order::domain::{Order, OrderId, OrderStatus, TransitionGuard};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for order repository operations.
pub type OrderRepositoryResult<T> = Result<T, OrderRepositoryError>;

/// Order persistence contract.
///
/// Every listing returns orders newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Stores a new order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderRepositoryError::DuplicateOrder`] when the identifier
    /// already exists.
    async fn store(&self, order: &Order) -> OrderRepositoryResult<()>;

    /// Finds an order by identifier.
    ///
    /// Returns `None` when the order does not exist.
    async fn find_by_id(&self, id: OrderId) -> OrderRepositoryResult<Option<Order>>;

    /// Overwrites the stored order with `order` if the stored copy still
    /// satisfies `guard`.
    ///
    /// The check and the write are a single atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`OrderRepositoryError::NotFound`] when the order does not
    /// exist and [`OrderRepositoryError::StaleTransition`] when the stored
    /// copy no longer satisfies `guard`.
    async fn compare_and_update(
        &self,
        order: &Order,
        guard: TransitionGuard,
    ) -> OrderRepositoryResult<()>;

    /// Returns all orders in `status`.
    async fn list_by_status(&self, status: OrderStatus) -> OrderRepositoryResult<Vec<Order>>;

    /// Returns all orders owned by `customer_id`.
    async fn list_by_customer(&self, customer_id: UserId) -> OrderRepositoryResult<Vec<Order>>;

    /// Returns all orders assigned to `worker_id`.
    async fn list_by_worker(&self, worker_id: UserId) -> OrderRepositoryResult<Vec<Order>>;

    /// Returns every order.
    async fn list_all(&self) -> OrderRepositoryResult<Vec<Order>>;
}

/// Errors returned by order repository implementations.
#[derive(Debug, Clone, Error)]
pub enum OrderRepositoryError {
    /// An order with the same identifier already exists.
    #[error("duplicate order identifier: {0}")]
    DuplicateOrder(OrderId),

    /// The order was not found.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// The stored order changed since it was read.
    #[error("order {order_id} is no longer {expected}")]
    StaleTransition {
        /// Order being written.
        order_id: OrderId,
        /// Status the writer expected.
        expected: OrderStatus,
    },

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl OrderRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
