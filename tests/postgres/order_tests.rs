//! Order persistence and guarded transitions against `PostgreSQL`.

use super::helpers::{repositories, stored_user, test_pool};
use eyre::{OptionExt, ensure};
use mockable::DefaultClock;
use rstest::rstest;
use std::time::Duration;
use yardwork::{
    account::domain::{Role, User},
    order::{
        adapters::postgres::PostgresOrderRepository,
        domain::{
            Address, Coordinates, Order, OrderDetails, OrderStatus, PhotoRefs, PriceTable, Rating,
            WorkType,
        },
        ports::{OrderRepository, OrderRepositoryError},
    },
};

async fn stored_order(
    orders: &PostgresOrderRepository,
    customer: &User,
    work_type: WorkType,
) -> eyre::Result<Order> {
    let details = OrderDetails::new(work_type, Address::new("Vinohradská 12, Praha")?)
        .with_description("Back garden")
        .with_coordinates(Coordinates::new(Some(50.075), Some(14.44))?)
        .with_photos(PhotoRefs::new(["photos/1.jpg", "photos/2.jpg"])?);
    let order = Order::new(
        customer.actor(),
        details,
        &PriceTable::default(),
        &DefaultClock,
    )?;
    orders.store(&order).await?;
    Ok(order)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in YARDWORK_TEST_DATABASE_URL"]
async fn stored_order_round_trips() -> eyre::Result<()> {
    let pool = test_pool().await?;
    let (users, orders) = repositories(&pool);
    let customer = stored_user(&users, Role::Customer, "Jana").await?;
    let order = stored_order(&orders, &customer, WorkType::FencePainting).await?;

    let loaded = orders
        .find_by_id(order.id())
        .await?
        .ok_or_eyre("order should be stored")?;

    ensure!(loaded.status() == OrderStatus::Pending);
    ensure!(loaded.work_type() == WorkType::FencePainting);
    ensure!(loaded.estimated_price().amount() == 600);
    ensure!(loaded.description() == Some("Back garden"));
    ensure!(loaded.photos().len() == 2);
    ensure!(loaded.coordinates() == order.coordinates());
    ensure!(loaded.customer_id() == customer.id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in YARDWORK_TEST_DATABASE_URL"]
async fn single_coordinate_is_stored_without_its_pair() -> eyre::Result<()> {
    let pool = test_pool().await?;
    let (users, orders) = repositories(&pool);
    let customer = stored_user(&users, Role::Customer, "Jana").await?;
    let details = OrderDetails::new(WorkType::Mowing, Address::new("Letná 3, Praha")?)
        .with_coordinates(Coordinates::new(None, Some(14.42))?);
    let order = Order::new(
        customer.actor(),
        details,
        &PriceTable::default(),
        &DefaultClock,
    )?;
    orders.store(&order).await?;

    let loaded = orders
        .find_by_id(order.id())
        .await?
        .ok_or_eyre("order should be stored")?;

    ensure!(loaded.coordinates().latitude().is_none());
    ensure!(loaded.coordinates().longitude() == Some(14.42));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in YARDWORK_TEST_DATABASE_URL"]
async fn second_accept_from_a_stale_copy_is_refused() -> eyre::Result<()> {
    let pool = test_pool().await?;
    let (users, orders) = repositories(&pool);
    let customer = stored_user(&users, Role::Customer, "Jana").await?;
    let first = stored_user(&users, Role::Worker, "First").await?;
    let second = stored_user(&users, Role::Worker, "Second").await?;
    let order = stored_order(&orders, &customer, WorkType::Mowing).await?;

    let mut winner = order.clone();
    let guard = winner.accept(first.actor(), &DefaultClock)?;
    orders.compare_and_update(&winner, guard).await?;

    let mut loser = order.clone();
    let stale_guard = loser.accept(second.actor(), &DefaultClock)?;
    let result = orders.compare_and_update(&loser, stale_guard).await;

    ensure!(
        matches!(result, Err(OrderRepositoryError::StaleTransition { .. })),
        "expected stale transition, got {result:?}"
    );
    let stored = orders
        .find_by_id(order.id())
        .await?
        .ok_or_eyre("order should exist")?;
    ensure!(stored.worker_id() == Some(first.id()));
    ensure!(stored.status() == OrderStatus::Accepted);
    ensure!(stored.estimated_price() == order.estimated_price());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in YARDWORK_TEST_DATABASE_URL"]
async fn review_is_written_once() -> eyre::Result<()> {
    let pool = test_pool().await?;
    let (users, orders) = repositories(&pool);
    let customer = stored_user(&users, Role::Customer, "Jana").await?;
    let worker = stored_user(&users, Role::Worker, "Karel").await?;
    let mut order = stored_order(&orders, &customer, WorkType::TreeTrimming).await?;
    let quoted = order.estimated_price();
    let accept = order.accept(worker.actor(), &DefaultClock)?;
    orders.compare_and_update(&order, accept).await?;
    let complete = order.complete(worker.actor(), &DefaultClock)?;
    orders.compare_and_update(&order, complete).await?;

    let mut first = order.clone();
    let first_guard = first.rate(
        customer.actor(),
        Rating::new(5)?,
        Some("Tidy work".to_owned()),
        &DefaultClock,
    )?;
    orders.compare_and_update(&first, first_guard).await?;

    let mut second = order.clone();
    let second_guard = second.rate(customer.actor(), Rating::new(1)?, None, &DefaultClock)?;
    let result = orders.compare_and_update(&second, second_guard).await;

    ensure!(matches!(result, Err(OrderRepositoryError::StaleTransition { .. })));
    let stored = orders
        .find_by_id(order.id())
        .await?
        .ok_or_eyre("order should exist")?;
    let review = stored.review().ok_or_eyre("review should be stored")?;
    ensure!(review.rating().value() == 5);
    ensure!(review.feedback() == Some("Tidy work"));
    ensure!(stored.estimated_price() == quoted);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in YARDWORK_TEST_DATABASE_URL"]
async fn transition_of_missing_order_is_not_found() -> eyre::Result<()> {
    let pool = test_pool().await?;
    let (users, orders) = repositories(&pool);
    let customer = stored_user(&users, Role::Customer, "Jana").await?;
    let worker = stored_user(&users, Role::Worker, "Karel").await?;
    let details = OrderDetails::new(WorkType::Other, Address::new("Nowhere 1")?);
    let mut unsaved = Order::new(
        customer.actor(),
        details,
        &PriceTable::default(),
        &DefaultClock,
    )?;
    let guard = unsaved.accept(worker.actor(), &DefaultClock)?;

    let result = orders.compare_and_update(&unsaved, guard).await;

    ensure!(matches!(result, Err(OrderRepositoryError::NotFound(id)) if id == unsaved.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in YARDWORK_TEST_DATABASE_URL"]
async fn customer_listing_is_newest_first() -> eyre::Result<()> {
    let pool = test_pool().await?;
    let (users, orders) = repositories(&pool);
    let customer = stored_user(&users, Role::Customer, "Jana").await?;
    let older = stored_order(&orders, &customer, WorkType::Mowing).await?;
    std::thread::sleep(Duration::from_millis(5));
    let newer = stored_order(&orders, &customer, WorkType::Other).await?;

    let listed: Vec<_> = orders
        .list_by_customer(customer.id())
        .await?
        .iter()
        .map(Order::id)
        .collect();

    ensure!(listed == vec![newer.id(), older.id()]);
    let pending = orders.list_by_status(OrderStatus::Pending).await?;
    ensure!(pending.iter().any(|order| order.id() == older.id()));
    Ok(())
}
