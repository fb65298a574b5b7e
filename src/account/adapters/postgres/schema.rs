//! Diesel schema for account persistence.

diesel::table! {
    /// Registered marketplace users.
    users (id) {
        /// Internal user identifier.
        id -> Uuid,
        /// Unique, case-sensitive login e-mail.
        #[max_length = 320]
        email -> Varchar,
        /// Opaque password digest.
        password_digest -> Text,
        /// Account role (customer, worker or admin).
        #[max_length = 20]
        role -> Varchar,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional contact phone number.
        #[max_length = 50]
        phone -> Nullable<Varchar>,
        /// Optional worker service area.
        #[max_length = 255]
        area -> Nullable<Varchar>,
        /// Owned tool labels as a JSONB array of strings.
        tools -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
