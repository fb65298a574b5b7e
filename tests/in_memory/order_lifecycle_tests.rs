//! End-to-end order lifecycle tests through the marketplace facade.

use super::helpers::{TestApi, admin_session, seeded_api, sign_up};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use yardwork::{
    account::domain::Role,
    api::ApiResult,
    error::ErrorKind,
    order::{
        domain::{Order, OrderId, OrderStatus, WorkType},
        services::CreateOrderRequest,
    },
    session::SessionToken,
};

fn expect_kind<T: std::fmt::Debug>(result: ApiResult<T>, expected: ErrorKind) -> eyre::Result<()> {
    match result {
        Ok(value) => Err(eyre::eyre!("expected {expected} failure, got {value:?}")),
        Err(err) if err.kind() == expected => Ok(()),
        Err(err) => Err(eyre::eyre!("expected {expected}, got {} ({err})", err.kind())),
    }
}

async fn place_mowing_order(api: &TestApi, token: &SessionToken) -> eyre::Result<Order> {
    let order = api
        .create_order(
            token,
            CreateOrderRequest::new("mowing", "Na Příkopě 1, Praha")
                .with_description("Front lawn, about 200 m2")
                .with_tools_available(true),
        )
        .await?;
    Ok(order)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn order_travels_from_pending_to_rated() -> eyre::Result<()> {
    let api = seeded_api().await?;
    let customer = sign_up(&api, Role::Customer, "Jana").await?;
    let worker = sign_up(&api, Role::Worker, "Karel").await?;

    let order = place_mowing_order(&api, &customer.token).await?;
    ensure!(order.status() == OrderStatus::Pending);
    ensure!(order.work_type() == WorkType::Mowing);
    ensure!(order.estimated_price().amount() == 500);
    ensure!(order.worker_id().is_none());

    let available = api.list_available_orders(&worker.token).await?;
    let listed = available
        .iter()
        .find(|overview| overview.order().id() == order.id())
        .ok_or_eyre("new order should be available to workers")?;
    let customer_summary = listed.customer().ok_or_eyre("worker should see the customer")?;
    ensure!(customer_summary.name() == "Jana");
    ensure!(customer_summary.email().is_none());

    let accepted = api.accept_order(&worker.token, order.id()).await?;
    ensure!(accepted.status() == OrderStatus::Accepted);
    ensure!(accepted.worker_id() == Some(worker.id));
    ensure!(api.list_available_orders(&worker.token).await?.is_empty());

    let completed = api.complete_order(&worker.token, order.id()).await?;
    ensure!(completed.status() == OrderStatus::Completed);

    let rated = api
        .rate_order(&customer.token, order.id(), 5, Some("  Great job ".to_owned()))
        .await?;
    let review = rated.review().ok_or_eyre("rating should be stored")?;
    ensure!(review.rating().value() == 5);
    ensure!(review.feedback() == Some("Great job"));
    ensure!(rated.status() == OrderStatus::Completed);

    let own = api.list_my_orders(&customer.token).await?;
    let mine = own.first().ok_or_eyre("customer should see their order")?;
    ensure!(mine.order().estimated_price() == order.estimated_price());
    let worker_summary = mine.worker().ok_or_eyre("customer should see the worker")?;
    ensure!(worker_summary.name() == "Karel");
    ensure!(mine.customer().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn estimated_price_is_fixed_after_creation() -> eyre::Result<()> {
    let api = seeded_api().await?;
    let customer = sign_up(&api, Role::Customer, "Jana").await?;
    let worker = sign_up(&api, Role::Worker, "Karel").await?;

    let order = api
        .create_order(
            &customer.token,
            CreateOrderRequest::new("tree_trimming", "Zahradní 5, Brno"),
        )
        .await?;
    let quoted = order.estimated_price();
    ensure!(quoted == api.estimate_price("tree_trimming"));

    let accepted = api.accept_order(&worker.token, order.id()).await?;
    ensure!(accepted.estimated_price() == quoted);
    let completed = api.complete_order(&worker.token, order.id()).await?;
    ensure!(completed.estimated_price() == quoted);
    let rated = api.rate_order(&customer.token, order.id(), 4, None).await?;
    ensure!(rated.estimated_price() == quoted);

    let listed = api.admin_list_orders(&admin_session(&api).await?).await?;
    let stored = listed
        .iter()
        .find(|overview| overview.order().id() == order.id())
        .ok_or_eyre("admin should see every order")?;
    ensure!(stored.order().estimated_price() == quoted);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_customers_place_orders() -> eyre::Result<()> {
    let api = seeded_api().await?;
    let worker = sign_up(&api, Role::Worker, "Petr").await?;

    let result = api
        .create_order(&worker.token, CreateOrderRequest::new("mowing", "Brno"))
        .await;

    expect_kind(result, ErrorKind::AuthorizationDenied)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn customers_cannot_accept_orders() -> eyre::Result<()> {
    let api = seeded_api().await?;
    let customer = sign_up(&api, Role::Customer, "Eva").await?;
    let order = place_mowing_order(&api, &customer.token).await?;

    expect_kind(
        api.accept_order(&customer.token, order.id()).await,
        ErrorKind::AuthorizationDenied,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_the_assigned_worker_completes() -> eyre::Result<()> {
    let api = seeded_api().await?;
    let customer = sign_up(&api, Role::Customer, "Eva").await?;
    let assigned = sign_up(&api, Role::Worker, "Assigned").await?;
    let other = sign_up(&api, Role::Worker, "Other").await?;
    let order = place_mowing_order(&api, &customer.token).await?;
    api.accept_order(&assigned.token, order.id()).await?;

    expect_kind(
        api.complete_order(&other.token, order.id()).await,
        ErrorKind::AuthorizationDenied,
    )?;
    let completed = api.complete_order(&assigned.token, order.id()).await?;
    ensure!(completed.status() == OrderStatus::Completed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_an_unassigned_order_is_denied() -> eyre::Result<()> {
    let api = seeded_api().await?;
    let customer = sign_up(&api, Role::Customer, "Eva").await?;
    let worker = sign_up(&api, Role::Worker, "Karel").await?;
    let order = place_mowing_order(&api, &customer.token).await?;

    expect_kind(
        api.complete_order(&worker.token, order.id()).await,
        ErrorKind::AuthorizationDenied,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rating_requires_a_completed_order() -> eyre::Result<()> {
    let api = seeded_api().await?;
    let customer = sign_up(&api, Role::Customer, "Eva").await?;
    let worker = sign_up(&api, Role::Worker, "Karel").await?;
    let order = place_mowing_order(&api, &customer.token).await?;
    api.accept_order(&worker.token, order.id()).await?;

    expect_kind(
        api.rate_order(&customer.token, order.id(), 4, None).await,
        ErrorKind::ConflictState,
    )
}

#[rstest]
#[case(0)]
#[case(6)]
#[case(-1)]
#[tokio::test(flavor = "multi_thread")]
async fn rating_outside_scale_is_rejected(#[case] rating: i64) -> eyre::Result<()> {
    let api = seeded_api().await?;
    let customer = sign_up(&api, Role::Customer, "Eva").await?;
    let worker = sign_up(&api, Role::Worker, "Karel").await?;
    let order = place_mowing_order(&api, &customer.token).await?;
    api.accept_order(&worker.token, order.id()).await?;
    api.complete_order(&worker.token, order.id()).await?;

    expect_kind(
        api.rate_order(&customer.token, order.id(), rating, None).await,
        ErrorKind::ValidationFailed,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn customers_rate_only_their_own_orders() -> eyre::Result<()> {
    let api = seeded_api().await?;
    let owner = sign_up(&api, Role::Customer, "Owner").await?;
    let stranger = sign_up(&api, Role::Customer, "Stranger").await?;
    let worker = sign_up(&api, Role::Worker, "Karel").await?;
    let order = place_mowing_order(&api, &owner.token).await?;
    api.accept_order(&worker.token, order.id()).await?;
    api.complete_order(&worker.token, order.id()).await?;

    expect_kind(
        api.rate_order(&stranger.token, order.id(), 3, None).await,
        ErrorKind::AuthorizationDenied,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_order_is_not_found() -> eyre::Result<()> {
    let api = seeded_api().await?;
    let worker = sign_up(&api, Role::Worker, "Karel").await?;

    expect_kind(
        api.accept_order(&worker.token, OrderId::new()).await,
        ErrorKind::NotFound,
    )
}

#[rstest]
#[case("mowing", 500)]
#[case("tree_trimming", 800)]
#[case("fence_painting", 600)]
#[case("other", 400)]
#[case("sekani_travy", 500)]
#[case("hedge_sculpting", 400)]
#[tokio::test(flavor = "multi_thread")]
async fn price_estimate_follows_work_type(
    #[case] work_type: &str,
    #[case] expected: u32,
) -> eyre::Result<()> {
    let api = seeded_api().await?;

    ensure!(api.estimate_price(work_type).amount() == expected);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn order_with_only_one_coordinate_keeps_it() -> eyre::Result<()> {
    let api = seeded_api().await?;
    let customer = sign_up(&api, Role::Customer, "Eva").await?;

    let order = api
        .create_order(
            &customer.token,
            CreateOrderRequest::new("mowing", "Praha").with_latitude(50.08),
        )
        .await?;

    ensure!(order.coordinates().latitude() == Some(50.08));
    ensure!(order.coordinates().longitude().is_none());
    let own = api.list_my_orders(&customer.token).await?;
    let stored = own.first().ok_or_eyre("customer should see their order")?;
    ensure!(stored.order().coordinates() == order.coordinates());
    Ok(())
}
