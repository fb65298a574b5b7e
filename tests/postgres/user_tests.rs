//! Account persistence against `PostgreSQL`.

use super::helpers::{repositories, stored_user, test_pool, unique_email};
use eyre::{OptionExt, ensure};
use mockable::DefaultClock;
use rstest::rstest;
use yardwork::account::{
    domain::{PasswordDigest, Role, User, UserProfile},
    ports::{UserRepository, UserRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in YARDWORK_TEST_DATABASE_URL"]
async fn stored_user_round_trips_by_id_and_email() -> eyre::Result<()> {
    let pool = test_pool().await?;
    let (users, _) = repositories(&pool);
    let worker = stored_user(&users, Role::Worker, "Karel").await?;

    let by_id = users
        .find_by_id(worker.id())
        .await?
        .ok_or_eyre("user should be found by id")?;
    let by_email = users
        .find_by_email(worker.email())
        .await?
        .ok_or_eyre("user should be found by e-mail")?;

    ensure!(by_id.id() == worker.id());
    ensure!(by_email.id() == worker.id());
    ensure!(by_id.profile().tools() == ["mower".to_owned()]);
    ensure!(by_id.profile().area() == Some("Praha"));
    ensure!(by_id.role() == Role::Worker);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in YARDWORK_TEST_DATABASE_URL"]
async fn duplicate_email_is_reported() -> eyre::Result<()> {
    let pool = test_pool().await?;
    let (users, _) = repositories(&pool);
    let original = stored_user(&users, Role::Customer, "Jana").await?;
    let copy = User::new(
        original.email().clone(),
        PasswordDigest::new("$argon2id$v=19$m=19456,t=2,p=1$b3RoZXJzYWx0$b3RoZXI"),
        Role::Customer,
        UserProfile::new("Jana Copy")?,
        &DefaultClock,
    )?;

    let result = users.store(&copy).await;

    ensure!(
        matches!(result, Err(UserRepositoryError::DuplicateEmail(_))),
        "expected duplicate e-mail, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in YARDWORK_TEST_DATABASE_URL"]
async fn find_many_returns_requested_users() -> eyre::Result<()> {
    let pool = test_pool().await?;
    let (users, _) = repositories(&pool);
    let customer = stored_user(&users, Role::Customer, "Eva").await?;
    let worker = stored_user(&users, Role::Worker, "Petr").await?;

    let mut found: Vec<_> = users
        .find_many(&[customer.id(), worker.id()])
        .await?
        .iter()
        .map(User::id)
        .collect();
    found.sort_unstable();
    let mut expected = vec![customer.id(), worker.id()];
    expected.sort_unstable();

    ensure!(found == expected);
    ensure!(users.find_by_email(&unique_email("ghost")?).await?.is_none());
    Ok(())
}
