//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered users with credential hashes and role flags.
    users (id) {
        /// Primary key, store-assigned.
        id -> Int4,
        /// Unique login handle.
        username -> Text,
        /// Argon2id PHC string.
        password_hash -> Text,
        /// Display name shown on dashboards.
        full_name -> Text,
        /// Contact address.
        email -> Text,
        /// Administrator capability flag.
        is_admin -> Bool,
        /// Department-head capability flag.
        is_department_head -> Bool,
        /// Owning department for a department head.
        department_id -> Nullable<Int4>,
    }
}

diesel::table! {
    /// Fixed municipal organizational units.
    departments (id) {
        /// Primary key, store-assigned.
        id -> Int4,
        /// Unique department name.
        name -> Text,
        /// Free-text description shown to citizens.
        description -> Nullable<Text>,
    }
}

diesel::table! {
    /// Citizen-submitted tickets.
    complaints (id) {
        /// Primary key, store-assigned.
        id -> Int4,
        /// Submitting user.
        user_id -> Int4,
        /// COMPLAINT, QUERY, or SUGGESTION.
        #[sql_name = "type"]
        kind -> Text,
        /// Free-text description.
        description -> Text,
        /// pending, processing, resolved, or rejected.
        status -> Text,
        /// Assigned department, null until triaged.
        department_id -> Nullable<Int4>,
        /// Creation timestamp stamped by the database.
        created_at -> Timestamptz,
    }
}
