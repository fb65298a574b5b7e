//! Diesel row models for order persistence.

use super::schema::orders;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for order records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    /// Internal order identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Owning customer.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub customer_id: uuid::Uuid,
    /// Assigned worker.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Uuid>)]
    pub worker_id: Option<uuid::Uuid>,
    /// Requested work type.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub work_type: String,
    /// Free-text description.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub description: Option<String>,
    /// Job-site address.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub address: String,
    /// Job-site latitude.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Float8>)]
    pub latitude: Option<f64>,
    /// Job-site longitude.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Float8>)]
    pub longitude: Option<f64>,
    /// Whether the customer lends tools.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub has_tools: bool,
    /// Photo references JSON payload.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub photo_refs: Value,
    /// Lifecycle status.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Price quoted at creation.
    #[diesel(sql_type = diesel::sql_types::Int4)]
    pub estimated_price: i32,
    /// Customer rating.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Int2>)]
    pub rating: Option<i16>,
    /// Customer feedback.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub feedback: Option<String>,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Latest lifecycle timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for order records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    /// Internal order identifier.
    pub id: uuid::Uuid,
    /// Owning customer.
    pub customer_id: uuid::Uuid,
    /// Assigned worker.
    pub worker_id: Option<uuid::Uuid>,
    /// Requested work type.
    pub work_type: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Job-site address.
    pub address: String,
    /// Job-site latitude.
    pub latitude: Option<f64>,
    /// Job-site longitude.
    pub longitude: Option<f64>,
    /// Whether the customer lends tools.
    pub has_tools: bool,
    /// Photo references JSON payload.
    pub photo_refs: Value,
    /// Lifecycle status.
    pub status: String,
    /// Price quoted at creation.
    pub estimated_price: i32,
    /// Customer rating.
    pub rating: Option<i16>,
    /// Customer feedback.
    pub feedback: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Columns a lifecycle transition may change.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = orders)]
#[diesel(treat_none_as_null = true)]
pub struct OrderTransitionChangeset {
    /// Assigned worker.
    pub worker_id: Option<uuid::Uuid>,
    /// Lifecycle status.
    pub status: String,
    /// Customer rating.
    pub rating: Option<i16>,
    /// Customer feedback.
    pub feedback: Option<String>,
    /// Latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}
