//! Diesel and pool error mapping for the user repository.

use tracing::debug;

use crate::domain::ports::UserPersistenceError;

use super::pool::PoolError;

/// Map pool errors to connection failures.
pub(super) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to user persistence errors.
///
/// Unique violations become constraint errors; a closed connection is a
/// connection error; everything else is a query error.
pub(super) fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            UserPersistenceError::constraint(info.message())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        _ => UserPersistenceError::query("database error"),
    }
}
