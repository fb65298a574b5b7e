//! Deployment configuration loaded from TOML.
//!
//! String values may reference environment variables as `${NAME}` or
//! `${NAME:-fallback}`; references are resolved before the TOML is parsed.
//!
//! ```toml
//! [database]
//! url = "${DATABASE_URL}"
//!
//! [pricing]
//! mowing = 550
//!
//! [session]
//! ttl_seconds = 3600
//!
//! [admin]
//! email = "admin@example.com"
//! password = "${ADMIN_PASSWORD}"
//! ```

use crate::account::services::AdminBootstrap;
use crate::order::domain::{EstimatedPrice, PriceTable, WorkType};
use chrono::TimeDelta;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Largest configuration file accepted.
const MAX_CONFIG_SIZE: usize = 1024 * 1024;

/// Largest price the `orders.estimated_price` INTEGER column can hold.
const MAX_PRICE_RATE: u32 = i32::MAX.unsigned_abs();

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The TOML is malformed or does not match the expected shape.
    #[error("configuration parse error: {0}")]
    Parse(String),
    /// A value is present but unusable.
    #[error("configuration validation error: {0}")]
    Validation(String),
    /// A referenced environment variable is unset and has no fallback.
    #[error("environment variable '{0}' is not set")]
    MissingVariable(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.message().to_owned())
    }
}

/// Top-level marketplace configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarketplaceConfig {
    /// `PostgreSQL` connection settings. Absent for in-memory deployments.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    /// Per-work-type price overrides.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Session lifetime settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Administrator account created at startup, if any.
    #[serde(default)]
    pub admin: Option<AdminConfig>,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `PostgreSQL` connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection URL.
    pub url: String,
    /// Maximum pooled connections.
    #[serde(default = "default_pool_size")]
    pub max_connections: u32,
}

const fn default_pool_size() -> u32 {
    8
}

/// Price overrides; an omitted entry keeps its default rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Rate for lawn mowing.
    pub mowing: Option<u32>,
    /// Rate for tree trimming.
    pub tree_trimming: Option<u32>,
    /// Rate for fence painting.
    pub fence_painting: Option<u32>,
    /// Rate for any other work.
    pub other: Option<u32>,
}

impl PricingConfig {
    /// Builds the rate card, applying overrides on top of the defaults.
    #[must_use]
    pub fn price_table(&self) -> PriceTable {
        [
            (WorkType::Mowing, self.mowing),
            (WorkType::TreeTrimming, self.tree_trimming),
            (WorkType::FencePainting, self.fence_painting),
            (WorkType::Other, self.other),
        ]
        .into_iter()
        .fold(PriceTable::default(), |table, (work_type, rate)| match rate {
            Some(amount) => table.with_rate(work_type, EstimatedPrice::new(amount)),
            None => table,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let overrides = [
            ("mowing", self.mowing),
            ("tree_trimming", self.tree_trimming),
            ("fence_painting", self.fence_painting),
            ("other", self.other),
        ];
        for (field, rate) in overrides {
            if let Some(amount) = rate
                && amount > MAX_PRICE_RATE
            {
                return Err(ConfigError::Validation(format!(
                    "pricing.{field} is {amount}, limit is {MAX_PRICE_RATE}"
                )));
            }
        }
        Ok(())
    }
}

/// Session lifetime settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Seconds a login stays valid.
    #[serde(default = "default_session_ttl_seconds")]
    pub ttl_seconds: u32,
}

const fn default_session_ttl_seconds() -> u32 {
    24 * 60 * 60
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_session_ttl_seconds(),
        }
    }
}

impl SessionConfig {
    /// Returns the session lifetime.
    #[must_use]
    pub fn ttl(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.ttl_seconds))
    }
}

/// Administrator bootstrap account.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// Login e-mail.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Display name.
    #[serde(default = "default_admin_name")]
    pub name: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

fn default_admin_name() -> String {
    "Administrator".to_owned()
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("phone", &self.phone)
            .finish()
    }
}

impl AdminConfig {
    /// Converts the section into an account bootstrap request.
    #[must_use]
    pub fn bootstrap(&self) -> AdminBootstrap {
        let bootstrap = AdminBootstrap::new(&self.email, &self.password, &self.name);
        match &self.phone {
            Some(phone) => bootstrap.with_phone(phone),
            None => bootstrap,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default = "default_json_logs")]
    pub json: bool,
}

fn default_log_filter() -> String {
    "info".to_owned()
}

const fn default_json_logs() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: default_json_logs(),
        }
    }
}

impl MarketplaceConfig {
    /// Reads and parses a configuration file, resolving variables from the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, malformed, refers
    /// to an unset variable or fails validation.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        contents.parse()
    }

    /// Parses configuration text, resolving `${NAME}` references through
    /// `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the text is malformed, refers to a
    /// variable `lookup` cannot supply or fails validation.
    pub fn parse_with<F>(input: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolved = resolve_variables(input, lookup)?;
        let config: Self = toml::from_str(&resolved)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(database) = &self.database {
            if database.url.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "database.url must not be empty".to_owned(),
                ));
            }
            if database.max_connections == 0 {
                return Err(ConfigError::Validation(
                    "database.max_connections must be positive".to_owned(),
                ));
            }
        }
        self.pricing.validate()?;
        if self.session.ttl_seconds == 0 {
            return Err(ConfigError::Validation(
                "session.ttl_seconds must be positive".to_owned(),
            ));
        }
        if let Some(admin) = &self.admin
            && (admin.email.trim().is_empty() || admin.password.is_empty())
        {
            return Err(ConfigError::Validation(
                "admin.email and admin.password must be set".to_owned(),
            ));
        }
        Ok(())
    }
}

impl FromStr for MarketplaceConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, |name| std::env::var(name).ok())
    }
}

/// Replaces `${NAME}` and `${NAME:-fallback}` references.
fn resolve_variables<F>(input: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if input.len() > MAX_CONFIG_SIZE {
        return Err(ConfigError::Validation(format!(
            "configuration is {} bytes, limit is {MAX_CONFIG_SIZE}",
            input.len()
        )));
    }

    let pattern = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
        .map_err(|err| ConfigError::Parse(err.to_string()))?;

    let mut resolved = String::with_capacity(input.len());
    let mut cursor = 0;
    for captures in pattern.captures_iter(input) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let value = match (lookup(name.as_str()), captures.get(2)) {
            (Some(value), _) => value,
            (None, Some(fallback)) => fallback.as_str().to_owned(),
            (None, None) => return Err(ConfigError::MissingVariable(name.as_str().to_owned())),
        };
        resolved.push_str(input.get(cursor..whole.start()).unwrap_or_default());
        resolved.push_str(&value);
        cursor = whole.end();
    }
    resolved.push_str(input.get(cursor..).unwrap_or_default());
    Ok(resolved)
}
