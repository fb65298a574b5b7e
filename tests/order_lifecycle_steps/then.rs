//! Then steps for order lifecycle BDD scenarios.

use super::world::OrderLifecycleWorld;
use rstest_bdd_macros::then;
use yardwork::order::domain::OrderStatus;

#[then(r#"the order status is "{status}""#)]
fn order_status_is(world: &OrderLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = OrderStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let order = world.current_order()?;

    if order.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            order.status()
        ));
    }
    Ok(())
}

#[then("the order carries rating {rating:u8}")]
fn order_carries_rating(world: &OrderLifecycleWorld, rating: u8) -> Result<(), eyre::Report> {
    let review = world
        .current_order()?
        .review()
        .ok_or_else(|| eyre::eyre!("order has no review"))?;

    if review.rating().value() != rating {
        return Err(eyre::eyre!(
            "expected rating {rating}, found {}",
            review.rating().value()
        ));
    }
    Ok(())
}

#[then(r#"the last action fails with "{kind}""#)]
fn last_action_fails(world: &OrderLifecycleWorld, kind: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the last action to fail"))?;

    if err.kind().as_str() != kind {
        return Err(eyre::eyre!("expected {kind} failure, got {}: {err}", err.kind()));
    }
    Ok(())
}

#[then(r#"the order is assigned to "{name}""#)]
fn order_assigned_to(world: &OrderLifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let expected = world.participant(&name)?.id;
    let assigned = world.current_order()?.worker_id();

    if assigned != Some(expected) {
        return Err(eyre::eyre!("expected order assigned to {name}, found {assigned:?}"));
    }
    Ok(())
}

#[then("the estimated price is {amount:u32}")]
fn estimated_price_is(world: &OrderLifecycleWorld, amount: u32) -> Result<(), eyre::Report> {
    let price = world.current_order()?.estimated_price();

    if price.amount() != amount {
        return Err(eyre::eyre!("expected price {amount}, found {price}"));
    }
    Ok(())
}
