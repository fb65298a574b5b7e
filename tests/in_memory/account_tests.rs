//! Registration, login and session handling through the facade.

use super::helpers::{ADMIN_EMAIL, ADMIN_PASSWORD, seeded_api, sign_up};
use eyre::ensure;
use rstest::rstest;
use yardwork::{
    account::{domain::Role, services::RegisterUserRequest},
    error::ErrorKind,
    session::SessionToken,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_identifies_the_registered_user() -> eyre::Result<()> {
    let api = seeded_api().await?;
    let registered = sign_up(&api, Role::Customer, "Jana").await?;

    let current = api.current_actor(&registered.token).await?;

    ensure!(current.actor().user_id() == registered.id);
    ensure!(current.actor().role() == Role::Customer);
    ensure!(current.name() == "Jana");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeded_admin_can_log_in() -> eyre::Result<()> {
    let api = seeded_api().await?;

    let outcome = api.login(ADMIN_EMAIL, ADMIN_PASSWORD).await?;

    ensure!(outcome.actor().role() == Role::Admin);
    ensure!(outcome.name() == "Administrator");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn self_registration_as_admin_is_rejected() -> eyre::Result<()> {
    let api = seeded_api().await?;

    let result = api
        .register(RegisterUserRequest::new(
            "boss@example.com",
            "pw",
            Role::Admin,
            "Boss",
        ))
        .await;

    ensure!(matches!(result, Err(ref err) if err.kind() == ErrorKind::ValidationFailed));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_conflicts() -> eyre::Result<()> {
    let api = seeded_api().await?;
    sign_up(&api, Role::Customer, "Jana").await?;

    let result = api
        .register(RegisterUserRequest::new(
            "jana@example.com",
            "other",
            Role::Worker,
            "Jana Again",
        ))
        .await;

    ensure!(matches!(result, Err(ref err) if err.kind() == ErrorKind::ConflictState));
    Ok(())
}

#[rstest]
#[case("", "pw", "Name")]
#[case("not-an-email", "pw", "Name")]
#[case("someone@example.com", "", "Name")]
#[case("someone@example.com", "pw", "  ")]
#[tokio::test(flavor = "multi_thread")]
async fn registration_validates_required_fields(
    #[case] email: &str,
    #[case] password: &str,
    #[case] name: &str,
) -> eyre::Result<()> {
    let api = seeded_api().await?;

    let result = api
        .register(RegisterUserRequest::new(email, password, Role::Customer, name))
        .await;

    ensure!(matches!(result, Err(ref err) if err.kind() == ErrorKind::ValidationFailed));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn logout_ends_the_session() -> eyre::Result<()> {
    let api = seeded_api().await?;
    let user = sign_up(&api, Role::Worker, "Karel").await?;

    api.logout(&user.token).await?;
    let result = api.list_available_orders(&user.token).await;

    ensure!(matches!(result, Err(ref err) if err.kind() == ErrorKind::AuthenticationRequired));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn forged_token_is_not_authenticated() -> eyre::Result<()> {
    let api = seeded_api().await?;
    sign_up(&api, Role::Worker, "Karel").await?;

    let result = api
        .list_available_orders(&SessionToken::new("forged-token"))
        .await;

    ensure!(matches!(result, Err(ref err) if err.kind() == ErrorKind::AuthenticationRequired));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn each_login_opens_an_independent_session() -> eyre::Result<()> {
    let api = seeded_api().await?;
    let first = sign_up(&api, Role::Customer, "Jana").await?;
    let second = api.login("jana@example.com", "pw").await?;
    ensure!(second.token() != &first.token);

    api.logout(&first.token).await?;

    ensure!(api.current_actor(second.token()).await.is_ok());
    Ok(())
}
