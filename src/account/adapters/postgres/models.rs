//! Diesel row models for account persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Internal user identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Login e-mail.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub email: String,
    /// Opaque password digest.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub password_digest: String,
    /// Account role.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub role: String,
    /// Display name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub name: String,
    /// Optional contact phone number.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Varchar>)]
    pub phone: Option<String>,
    /// Optional worker service area.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Varchar>)]
    pub area: Option<String>,
    /// Owned tool labels JSON payload.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub tools: Value,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Internal user identifier.
    pub id: uuid::Uuid,
    /// Login e-mail.
    pub email: String,
    /// Opaque password digest.
    pub password_digest: String,
    /// Account role.
    pub role: String,
    /// Display name.
    pub name: String,
    /// Optional contact phone number.
    pub phone: Option<String>,
    /// Optional worker service area.
    pub area: Option<String>,
    /// Owned tool labels JSON payload.
    pub tools: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
