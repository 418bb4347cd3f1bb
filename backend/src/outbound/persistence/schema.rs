//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` or update by hand when a migration changes a table.

diesel::table! {
    /// Job applications, one row per tracked posting.
    ///
    /// `seq` is a monotonically increasing insertion counter used to order
    /// rows that share a `created_at` value.
    job_applications (id) {
        /// Primary key: opaque identifier assigned by the service.
        id -> Text,
        /// Insertion order tie-breaker.
        seq -> Int8,
        company -> Text,
        role -> Text,
        /// One of `wishlist`, `applied`, `interview`, `offer`, `rejected`.
        status -> Text,
        location -> Nullable<Text>,
        link -> Nullable<Text>,
        source -> Nullable<Text>,
        salary -> Nullable<Text>,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
