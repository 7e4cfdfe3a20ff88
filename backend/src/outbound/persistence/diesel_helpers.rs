//! Error mapping shared by the Diesel adapters.

use tracing::debug;

use crate::domain::ports::AccountDirectoryError;

use super::pool::PoolError;

/// Map pool failures to directory connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> AccountDirectoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            AccountDirectoryError::connection(message)
        }
    }
}

/// Map Diesel failures to directory errors, logging the cause at debug level.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> AccountDirectoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AccountDirectoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => AccountDirectoryError::query("database query error"),
        _ => AccountDirectoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PoolError::checkout("timed out"), "timed out")]
    #[case(PoolError::build("bad url"), "bad url")]
    fn pool_errors_become_connection_errors(#[case] error: PoolError, #[case] message: &str) {
        assert_eq!(
            map_pool_error(error),
            AccountDirectoryError::connection(message)
        );
    }

    #[rstest]
    fn other_diesel_errors_become_query_errors() {
        assert_eq!(
            map_diesel_error(diesel::result::Error::NotFound),
            AccountDirectoryError::query("database error")
        );
    }
}
