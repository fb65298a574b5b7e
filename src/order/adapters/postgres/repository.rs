//! `PostgreSQL` repository implementation for orders.

use super::{
    models::{NewOrderRow, OrderRow, OrderTransitionChangeset},
    schema::orders,
};
use crate::account::domain::UserId;
use crate::order::{
    domain::{
        Address, Coordinates, EstimatedPrice, Order, OrderId, OrderStatus, PersistedOrderData,
        PhotoRefs, Rating, Review, TransitionGuard, WorkType,
    },
    ports::{OrderRepository, OrderRepositoryError, OrderRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by order adapters.
pub type OrderPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed order repository.
#[derive(Debug, Clone)]
pub struct PostgresOrderRepository {
    pool: OrderPgPool,
}

impl PostgresOrderRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: OrderPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> OrderRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> OrderRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(OrderRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(OrderRepositoryError::persistence)?
    }

    async fn load_newest_first<F>(&self, query: F) -> OrderRepositoryResult<Vec<Order>>
    where
        F: FnOnce(&mut PgConnection) -> QueryResult<Vec<OrderRow>> + Send + 'static,
    {
        self.run_blocking(move |connection| {
            let rows = query(connection).map_err(OrderRepositoryError::persistence)?;
            rows.into_iter().map(row_to_order).collect()
        })
        .await
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn store(&self, order: &Order) -> OrderRepositoryResult<()> {
        let order_id = order.id();
        let new_row = to_new_row(order)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(orders::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        OrderRepositoryError::DuplicateOrder(order_id)
                    }
                    _ => OrderRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: OrderId) -> OrderRepositoryResult<Option<Order>> {
        self.run_blocking(move |connection| {
            let row = orders::table
                .filter(orders::id.eq(id.into_inner()))
                .select(OrderRow::as_select())
                .first::<OrderRow>(connection)
                .optional()
                .map_err(OrderRepositoryError::persistence)?;
            row.map(row_to_order).transpose()
        })
        .await
    }

    async fn compare_and_update(
        &self,
        order: &Order,
        guard: TransitionGuard,
    ) -> OrderRepositoryResult<()> {
        let order_id = order.id();
        let changeset = to_changeset(order);

        self.run_blocking(move |connection| {
            let target = orders::table
                .filter(orders::id.eq(order_id.into_inner()))
                .filter(orders::status.eq(guard.expected_status().as_str()));
            let updated = if guard.requires_unrated() {
                diesel::update(target.filter(orders::rating.is_null()))
                    .set(&changeset)
                    .execute(connection)
            } else {
                diesel::update(target).set(&changeset).execute(connection)
            }
            .map_err(OrderRepositoryError::persistence)?;

            if updated > 0 {
                return Ok(());
            }

            let exists = orders::table
                .filter(orders::id.eq(order_id.into_inner()))
                .select(orders::id)
                .first::<uuid::Uuid>(connection)
                .optional()
                .map_err(OrderRepositoryError::persistence)?;
            match exists {
                Some(_) => Err(OrderRepositoryError::StaleTransition {
                    order_id,
                    expected: guard.expected_status(),
                }),
                None => Err(OrderRepositoryError::NotFound(order_id)),
            }
        })
        .await
    }

    async fn list_by_status(&self, status: OrderStatus) -> OrderRepositoryResult<Vec<Order>> {
        let status_str = status.as_str();
        self.load_newest_first(move |connection| {
            orders::table
                .filter(orders::status.eq(status_str))
                .order(orders::created_at.desc())
                .select(OrderRow::as_select())
                .load::<OrderRow>(connection)
        })
        .await
    }

    async fn list_by_customer(&self, customer_id: UserId) -> OrderRepositoryResult<Vec<Order>> {
        self.load_newest_first(move |connection| {
            orders::table
                .filter(orders::customer_id.eq(customer_id.into_inner()))
                .order(orders::created_at.desc())
                .select(OrderRow::as_select())
                .load::<OrderRow>(connection)
        })
        .await
    }

    async fn list_by_worker(&self, worker_id: UserId) -> OrderRepositoryResult<Vec<Order>> {
        self.load_newest_first(move |connection| {
            orders::table
                .filter(orders::worker_id.eq(worker_id.into_inner()))
                .order(orders::created_at.desc())
                .select(OrderRow::as_select())
                .load::<OrderRow>(connection)
        })
        .await
    }

    async fn list_all(&self) -> OrderRepositoryResult<Vec<Order>> {
        self.load_newest_first(move |connection| {
            orders::table
                .order(orders::created_at.desc())
                .select(OrderRow::as_select())
                .load::<OrderRow>(connection)
        })
        .await
    }
}

fn to_new_row(order: &Order) -> OrderRepositoryResult<NewOrderRow> {
    let photo_refs =
        serde_json::to_value(order.photos()).map_err(OrderRepositoryError::persistence)?;
    let estimated_price = i32::try_from(order.estimated_price().amount())
        .map_err(OrderRepositoryError::persistence)?;
    let changes = to_changeset(order);

    Ok(NewOrderRow {
        id: order.id().into_inner(),
        customer_id: order.customer_id().into_inner(),
        worker_id: changes.worker_id,
        work_type: order.work_type().as_str().to_owned(),
        description: order.description().map(str::to_owned),
        address: order.address().as_str().to_owned(),
        latitude: order.coordinates().latitude(),
        longitude: order.coordinates().longitude(),
        has_tools: order.has_tools(),
        photo_refs,
        status: changes.status,
        estimated_price,
        rating: changes.rating,
        feedback: changes.feedback,
        created_at: order.created_at(),
        updated_at: changes.updated_at,
    })
}

fn to_changeset(order: &Order) -> OrderTransitionChangeset {
    let review = order.review();
    OrderTransitionChangeset {
        worker_id: order.worker_id().map(UserId::into_inner),
        status: order.status().as_str().to_owned(),
        rating: review.map(|r| i16::from(r.rating().value())),
        feedback: review.and_then(Review::feedback).map(str::to_owned),
        updated_at: order.updated_at(),
    }
}

fn row_to_order(row: OrderRow) -> OrderRepositoryResult<Order> {
    let OrderRow {
        id,
        customer_id,
        worker_id,
        work_type,
        description,
        address,
        latitude,
        longitude,
        has_tools,
        photo_refs,
        status,
        estimated_price,
        rating,
        feedback,
        created_at,
        updated_at,
    } = row;

    let parsed_work_type = WorkType::try_from(work_type.as_str())
        .map_err(OrderRepositoryError::invalid_persisted_data)?;
    let parsed_status =
        OrderStatus::try_from(status.as_str()).map_err(OrderRepositoryError::invalid_persisted_data)?;
    let parsed_address =
        Address::new(address).map_err(OrderRepositoryError::invalid_persisted_data)?;
    let coordinates = Coordinates::new(latitude, longitude)
        .map_err(OrderRepositoryError::invalid_persisted_data)?;
    let photo_strings: Vec<String> =
        serde_json::from_value(photo_refs).map_err(OrderRepositoryError::invalid_persisted_data)?;
    let photos =
        PhotoRefs::new(photo_strings).map_err(OrderRepositoryError::invalid_persisted_data)?;
    let price = u32::try_from(estimated_price)
        .map_err(OrderRepositoryError::invalid_persisted_data)?;
    let review = rating
        .map(|stars| Rating::new(i64::from(stars)))
        .transpose()
        .map_err(OrderRepositoryError::invalid_persisted_data)?
        .map(|parsed| Review::new(parsed, feedback));

    let data = PersistedOrderData {
        id: OrderId::from_uuid(id),
        customer_id: UserId::from_uuid(customer_id),
        worker_id: worker_id.map(UserId::from_uuid),
        work_type: parsed_work_type,
        description,
        address: parsed_address,
        coordinates,
        has_tools,
        photos,
        status: parsed_status,
        estimated_price: EstimatedPrice::new(price),
        review,
        created_at,
        updated_at,
    };
    Ok(Order::from_persisted(data))
}
