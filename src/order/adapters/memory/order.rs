//! In-memory repository for order lifecycle tests and single-process use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::account::domain::UserId;
use crate::order::{
    domain::{Order, OrderId, OrderStatus, TransitionGuard},
    ports::{OrderRepository, OrderRepositoryError, OrderRepositoryResult},
};

/// Thread-safe in-memory order repository.
///
/// Conditional updates run under the write lock, so the guard check and the
/// write cannot interleave with another writer.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    state: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_newest_first(
        &self,
        predicate: impl Fn(&Order) -> bool,
    ) -> OrderRepositoryResult<Vec<Order>> {
        let orders = self.state.read().map_err(lock_poisoned)?;
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|order| predicate(order))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(matching)
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> OrderRepositoryError {
    OrderRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn store(&self, order: &Order) -> OrderRepositoryResult<()> {
        let mut orders = self.state.write().map_err(lock_poisoned)?;
        if orders.contains_key(&order.id()) {
            return Err(OrderRepositoryError::DuplicateOrder(order.id()));
        }
        orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: OrderId) -> OrderRepositoryResult<Option<Order>> {
        let orders = self.state.read().map_err(lock_poisoned)?;
        Ok(orders.get(&id).cloned())
    }

    async fn compare_and_update(
        &self,
        order: &Order,
        guard: TransitionGuard,
    ) -> OrderRepositoryResult<()> {
        let mut orders = self.state.write().map_err(lock_poisoned)?;
        let stored = orders
            .get_mut(&order.id())
            .ok_or(OrderRepositoryError::NotFound(order.id()))?;
        if !guard.admits(stored) {
            return Err(OrderRepositoryError::StaleTransition {
                order_id: order.id(),
                expected: guard.expected_status(),
            });
        }
        *stored = order.clone();
        Ok(())
    }

    async fn list_by_status(&self, status: OrderStatus) -> OrderRepositoryResult<Vec<Order>> {
        self.collect_newest_first(|order| order.status() == status)
    }

    async fn list_by_customer(&self, customer_id: UserId) -> OrderRepositoryResult<Vec<Order>> {
        self.collect_newest_first(|order| order.customer_id() == customer_id)
    }

    async fn list_by_worker(&self, worker_id: UserId) -> OrderRepositoryResult<Vec<Order>> {
        self.collect_newest_first(|order| order.worker_id() == Some(worker_id))
    }

    async fn list_all(&self) -> OrderRepositoryResult<Vec<Order>> {
        self.collect_newest_first(|_| true)
    }
}
