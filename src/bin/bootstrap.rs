//! Prepares a `PostgreSQL` database for the marketplace.
//!
//! Usage:
//!
//! ```text
//! bootstrap <config-path>
//! ```
//!
//! Loads the TOML configuration, installs the schema and makes sure the
//! configured administrator account exists. Running it twice is harmless.

use std::process::ExitCode;
use std::sync::Arc;

use mockable::DefaultClock;
use thiserror::Error;
use tracing::{error, info, warn};
use yardwork::account::{
    adapters::{Argon2PasswordHasher, postgres::PostgresUserRepository},
    services::{AccountService, AccountServiceError},
};
use yardwork::config::{ConfigError, LoggingConfig, MarketplaceConfig};
use yardwork::observability::init_tracing;
use yardwork::storage::{StorageError, apply_schema, connect};

/// Errors that stop the bootstrap.
#[derive(Debug, Error)]
enum BootstrapError {
    #[error("usage: bootstrap <config-path>")]
    Usage,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("configuration has no [database] section")]
    MissingDatabase,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Account(#[from] AccountServiceError),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Config errors surface before the configured subscriber exists.
            let _fallback = init_tracing(&LoggingConfig::default());
            error!(error = %err, "bootstrap failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), BootstrapError> {
    let path = std::env::args().nth(1).ok_or(BootstrapError::Usage)?;
    let config = MarketplaceConfig::from_file(&path)?;
    if !init_tracing(&config.logging) {
        warn!("tracing subscriber was already installed");
    }

    let database = config
        .database
        .as_ref()
        .ok_or(BootstrapError::MissingDatabase)?;
    let pool = connect(database)?;
    apply_schema(&pool).await?;
    info!("schema installed");

    let Some(admin) = &config.admin else {
        info!("no [admin] section, skipping administrator bootstrap");
        return Ok(());
    };

    let accounts = AccountService::new(
        Arc::new(PostgresUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(DefaultClock),
    );
    let user = accounts.ensure_admin(admin.bootstrap()).await?;
    info!(user_id = %user.id(), "administrator account ready");
    Ok(())
}
