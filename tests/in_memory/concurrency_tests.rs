//! Racing transitions on a shared marketplace.

use std::sync::Arc;

use super::helpers::{seeded_api, sign_up};
use eyre::{WrapErr, ensure};
use rstest::rstest;
use yardwork::{
    account::domain::Role,
    error::ErrorKind,
    order::{domain::OrderStatus, services::CreateOrderRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn exactly_one_worker_wins_a_race_to_accept() -> eyre::Result<()> {
    let api = seeded_api().await?;
    let customer = sign_up(&api, Role::Customer, "Jana").await?;
    let first = sign_up(&api, Role::Worker, "First").await?;
    let second = sign_up(&api, Role::Worker, "Second").await?;
    let order = api
        .create_order(&customer.token, CreateOrderRequest::new("mowing", "Praha"))
        .await?;
    let order_id = order.id();

    let handles = [first.token.clone(), second.token.clone()].map(|token| {
        let shared = Arc::clone(&api);
        tokio::spawn(async move { shared.accept_order(&token, order_id).await })
    });
    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.wrap_err("accept task panicked")?);
    }

    let winners: Vec<_> = outcomes.iter().filter_map(|outcome| outcome.as_ref().ok()).collect();
    ensure!(winners.len() == 1, "expected one winner, got {}", winners.len());
    let losers: Vec<_> = outcomes.iter().filter_map(|outcome| outcome.as_ref().err()).collect();
    ensure!(losers.len() == 1, "expected one loser, got {}", losers.len());
    ensure!(losers.iter().all(|err| err.kind() == ErrorKind::ConflictState));
    ensure!(
        losers
            .iter()
            .all(|err| err.message().contains("no longer available"))
    );

    let assigned = winners
        .first()
        .and_then(|order| order.worker_id())
        .ok_or_else(|| eyre::eyre!("winning order should carry a worker"))?;
    ensure!(assigned == first.id || assigned == second.id);

    let own = api.list_my_orders(&customer.token).await?;
    ensure!(own.len() == 1);
    ensure!(
        own.iter()
            .all(|overview| overview.order().status() == OrderStatus::Accepted
                && overview.order().worker_id() == Some(assigned))
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_ratings_store_a_single_review() -> eyre::Result<()> {
    let api = seeded_api().await?;
    let customer = sign_up(&api, Role::Customer, "Jana").await?;
    let worker = sign_up(&api, Role::Worker, "Karel").await?;
    let order = api
        .create_order(&customer.token, CreateOrderRequest::new("fence_painting", "Brno"))
        .await?;
    api.accept_order(&worker.token, order.id()).await?;
    api.complete_order(&worker.token, order.id()).await?;

    let handles = [4_i64, 2_i64].map(|rating| {
        let shared = Arc::clone(&api);
        let token = customer.token.clone();
        let order_id = order.id();
        tokio::spawn(async move { shared.rate_order(&token, order_id, rating, None).await })
    });
    let mut successes = 0_usize;
    for handle in handles {
        match handle.await.wrap_err("rate task panicked")? {
            Ok(_) => successes += 1,
            Err(err) => ensure!(err.kind() == ErrorKind::ConflictState),
        }
    }

    ensure!(successes == 1, "expected one stored review, got {successes}");
    Ok(())
}
