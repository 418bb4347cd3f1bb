//! Diesel and pool error mapping for the application repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::ApplicationRepositoryError;

use super::pool::PoolError;

/// Map pool errors to repository connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> ApplicationRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    ApplicationRepositoryError::connection(message)
}

/// Map Diesel errors to repository errors.
///
/// Closed connections map to `Connection`; everything else is a `Query`
/// failure. Database messages are logged at debug level and kept out of the
/// returned error.
pub(crate) fn map_diesel_error(error: DieselError) -> ApplicationRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => ApplicationRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => {
            ApplicationRepositoryError::query("database query error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ApplicationRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ApplicationRepositoryError::query("duplicate application id")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            ApplicationRepositoryError::query("row violates a table constraint")
        }
        _ => ApplicationRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, ApplicationRepositoryError::connection("timed out"));
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(DieselError::RollbackTransaction, "database error")]
    fn diesel_errors_become_query_errors(#[case] error: DieselError, #[case] expected: &str) {
        assert_eq!(map_diesel_error(error), ApplicationRepositoryError::query(expected));
    }
}
