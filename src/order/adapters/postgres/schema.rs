//! Diesel schema for order persistence.

diesel::table! {
    /// Yard-work orders placed by customers.
    orders (id) {
        /// Internal order identifier.
        id -> Uuid,
        /// Owning customer (`users.id`).
        customer_id -> Uuid,
        /// Assigned worker (`users.id`), set on acceptance.
        worker_id -> Nullable<Uuid>,
        /// Requested work type.
        #[max_length = 50]
        work_type -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Job-site address.
        address -> Text,
        /// Optional job-site latitude.
        latitude -> Nullable<Float8>,
        /// Optional job-site longitude.
        longitude -> Nullable<Float8>,
        /// Whether the customer lends tools.
        has_tools -> Bool,
        /// Photo references as a JSONB array of strings.
        photo_refs -> Jsonb,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Price quoted at creation.
        estimated_price -> Int4,
        /// Customer rating, once reviewed.
        rating -> Nullable<Int2>,
        /// Customer feedback paired with the rating.
        feedback -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest lifecycle timestamp.
        updated_at -> Timestamptz,
    }
}
