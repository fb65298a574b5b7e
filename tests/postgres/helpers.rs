//! Shared test helpers for `PostgreSQL` integration tests.

use mockable::DefaultClock;
use uuid::Uuid;
use yardwork::{
    account::{
        adapters::postgres::PostgresUserRepository,
        domain::{EmailAddress, PasswordDigest, Role, User, UserProfile},
        ports::UserRepository,
    },
    config::DatabaseConfig,
    order::adapters::postgres::PostgresOrderRepository,
    storage::{self, PgPool},
};

/// Environment variable naming the database the tests may write to.
pub const DATABASE_URL_VAR: &str = "YARDWORK_TEST_DATABASE_URL";

/// Connects to the test database and applies the schema.
///
/// # Errors
///
/// Returns an error if [`DATABASE_URL_VAR`] is unset, the pool cannot be
/// built or the schema fails to apply.
pub async fn test_pool() -> eyre::Result<PgPool> {
    let url = std::env::var(DATABASE_URL_VAR)
        .map_err(|err| eyre::eyre!("{DATABASE_URL_VAR} must name a test database: {err}"))?;
    let pool = storage::connect(&DatabaseConfig {
        url,
        max_connections: 4,
    })?;
    storage::apply_schema(&pool).await?;
    Ok(pool)
}

/// Builds both repositories over one pool.
#[must_use]
pub fn repositories(pool: &PgPool) -> (PostgresUserRepository, PostgresOrderRepository) {
    (
        PostgresUserRepository::new(pool.clone()),
        PostgresOrderRepository::new(pool.clone()),
    )
}

/// Returns an e-mail address no other test run has used.
///
/// # Errors
///
/// Returns an error if the generated address fails validation.
pub fn unique_email(prefix: &str) -> eyre::Result<EmailAddress> {
    Ok(EmailAddress::new(format!(
        "{prefix}-{}@example.com",
        Uuid::new_v4().simple()
    ))?)
}

/// Stores a fresh user with `role` and returns it.
///
/// # Errors
///
/// Returns an error if the user is invalid or cannot be stored.
pub async fn stored_user(
    users: &PostgresUserRepository,
    role: Role,
    name: &str,
) -> eyre::Result<User> {
    let mut profile = UserProfile::new(name)?.with_phone("+420 600 111 222");
    if role == Role::Worker {
        profile = profile.with_area("Praha").with_tools(vec!["mower".to_owned()]);
    }
    let user = User::new(
        unique_email(&name.to_lowercase())?,
        PasswordDigest::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaA"),
        role,
        profile,
        &DefaultClock,
    )?;
    users.store(&user).await?;
    Ok(user)
}
