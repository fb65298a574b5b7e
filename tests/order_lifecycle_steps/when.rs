//! When steps for order lifecycle BDD scenarios.

use super::world::{OrderLifecycleWorld, run_async};
use rstest_bdd_macros::when;
use yardwork::{api::ApiResult, order::domain::Order};

fn record(world: &mut OrderLifecycleWorld, result: ApiResult<Order>) {
    match result {
        Ok(order) => {
            world.order = Some(order);
            world.last_error = None;
        }
        Err(err) => world.last_error = Some(err),
    }
}

#[when(r#""{name}" accepts the order"#)]
fn worker_accepts(world: &mut OrderLifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let token = world.participant(&name)?.token.clone();
    let order_id = world.current_order()?.id();
    let result = run_async(world.api.accept_order(&token, order_id));
    record(world, result);
    Ok(())
}

#[when(r#""{name}" completes the order"#)]
fn worker_completes(world: &mut OrderLifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let token = world.participant(&name)?.token.clone();
    let order_id = world.current_order()?.id();
    let result = run_async(world.api.complete_order(&token, order_id));
    record(world, result);
    Ok(())
}

#[when(r#""{name}" rates the order {rating:i64}"#)]
fn customer_rates(
    world: &mut OrderLifecycleWorld,
    name: String,
    rating: i64,
) -> Result<(), eyre::Report> {
    let token = world.participant(&name)?.token.clone();
    let order_id = world.current_order()?.id();
    let result = run_async(world.api.rate_order(&token, order_id, rating, None));
    record(world, result);
    Ok(())
}
