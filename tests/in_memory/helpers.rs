//! Shared test helpers for in-memory marketplace integration tests.

use std::sync::Arc;

use yardwork::{
    account::{
        adapters::{Argon2PasswordHasher, memory::InMemoryUserRepository},
        domain::{Role, UserId},
        services::{AccountService, AdminBootstrap, RegisterUserRequest},
    },
    api::{ApiResult, MarketplaceApi},
    order::{
        adapters::memory::InMemoryOrderRepository, domain::PriceTable,
        services::OrderLifecycleService,
    },
    session::{SessionToken, adapters::memory::InMemorySessionStore},
};
use mockable::DefaultClock;

/// Fully in-memory marketplace facade.
pub type TestApi = MarketplaceApi<
    InMemoryUserRepository,
    Argon2PasswordHasher,
    InMemoryOrderRepository,
    InMemorySessionStore<DefaultClock>,
    DefaultClock,
>;

/// Default administrator credentials seeded by [`seeded_api`].
pub const ADMIN_EMAIL: &str = "admin@example.com";
/// Password for [`ADMIN_EMAIL`].
pub const ADMIN_PASSWORD: &str = "admin123";

/// A registered user with an open session.
pub struct LoggedIn {
    pub id: UserId,
    pub token: SessionToken,
}

/// Builds an in-memory facade and seeds the administrator account.
///
/// # Errors
///
/// Returns an error if seeding the administrator fails.
pub async fn seeded_api() -> eyre::Result<Arc<TestApi>> {
    let users = Arc::new(InMemoryUserRepository::new());
    let clock = Arc::new(DefaultClock);
    let accounts = AccountService::new(
        Arc::clone(&users),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::clone(&clock),
    );
    accounts
        .ensure_admin(
            AdminBootstrap::new(ADMIN_EMAIL, ADMIN_PASSWORD, "Administrator")
                .with_phone("+420123456789"),
        )
        .await?;
    let orders = OrderLifecycleService::new(
        Arc::new(InMemoryOrderRepository::new()),
        users,
        PriceTable::default(),
        Arc::clone(&clock),
    );
    let sessions = Arc::new(InMemorySessionStore::with_default_ttl(clock));
    Ok(Arc::new(MarketplaceApi::new(accounts, orders, sessions)))
}

/// Registers a user with `role` and logs them in.
///
/// # Errors
///
/// Returns an error if registration or login fails.
pub async fn sign_up(api: &TestApi, role: Role, name: &str) -> eyre::Result<LoggedIn> {
    let email = format!("{}@example.com", name.to_lowercase());
    let mut request = RegisterUserRequest::new(email.as_str(), "pw", role, name)
        .with_phone("+420 777 000 111");
    if role == Role::Worker {
        request = request.with_area("Praha").with_tools(vec!["mower".to_owned()]);
    }
    let id = api.register(request).await?;
    let outcome = api.login(&email, "pw").await?;
    Ok(LoggedIn {
        id,
        token: outcome.token().clone(),
    })
}

/// Logs in as the seeded administrator.
///
/// # Errors
///
/// Returns an error if the administrator cannot log in.
pub async fn admin_session(api: &TestApi) -> ApiResult<SessionToken> {
    let outcome = api.login(ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    Ok(outcome.token().clone())
}
