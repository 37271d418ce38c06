//! Diesel table definitions for the PostgreSQL user store.
//!
//! Must match the `CREATE TABLE` statement issued by
//! `DieselUserRepository::ensure_schema`.

diesel::table! {
    /// User records.
    users (id) {
        /// Serial primary key.
        id -> Int4,
        name -> Varchar,
        /// Unique across all rows.
        email -> Varchar,
        /// Defaults to the insertion time; stored without a zone as UTC.
        created_at -> Nullable<Timestamp>,
    }
}
