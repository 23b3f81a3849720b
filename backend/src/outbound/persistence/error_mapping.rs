//! Diesel and pool error translation into [`UserStoreError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;
use crate::domain::ports::UserStoreError;

/// Unique constraint guarding `users.email`.
pub(crate) const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

pub(crate) fn map_pool_error(error: PoolError) -> UserStoreError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    UserStoreError::connection(message)
}

/// Map a Diesel failure. `email` is reported when the unique email
/// constraint fires during an insert.
pub(crate) fn map_diesel_error(error: DieselError, email: Option<&str>) -> UserStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if is_email_violation(info.constraint_name()) =>
        {
            UserStoreError::duplicate_email(email.unwrap_or_default())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserStoreError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => UserStoreError::query("database query error"),
        _ => UserStoreError::query("database error"),
    }
}

fn is_email_violation(constraint: Option<&str>) -> bool {
    // Some drivers omit the constraint name; email is the only unique column
    // besides the primary key, which is generated fresh per insert.
    constraint.is_none_or(|name| name == EMAIL_UNIQUE_CONSTRAINT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct StubInfo(Option<&'static str>);

    impl diesel::result::DatabaseErrorInformation for StubInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("users")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.0
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(StubInfo(constraint)))
    }

    #[rstest]
    #[case(Some(EMAIL_UNIQUE_CONSTRAINT))]
    #[case(None)]
    fn email_unique_violation_maps_to_duplicate(#[case] constraint: Option<&'static str>) {
        let error = map_diesel_error(
            database_error(DatabaseErrorKind::UniqueViolation, constraint),
            Some("ada@example.com"),
        );
        assert_eq!(error, UserStoreError::duplicate_email("ada@example.com"));
    }

    #[test]
    fn other_unique_violation_is_a_query_error() {
        let error = map_diesel_error(
            database_error(DatabaseErrorKind::UniqueViolation, Some("users_pkey")),
            Some("ada@example.com"),
        );
        assert!(matches!(error, UserStoreError::Query { .. }));
    }

    #[test]
    fn closed_connection_maps_to_connection_error() {
        let error = map_diesel_error(
            database_error(DatabaseErrorKind::ClosedConnection, None),
            None,
        );
        assert!(matches!(error, UserStoreError::Connection { .. }));
    }

    #[test]
    fn not_found_maps_to_query_error() {
        let error = map_diesel_error(DieselError::NotFound, None);
        assert_eq!(error, UserStoreError::query("database error"));
    }

    #[rstest]
    #[case(PoolError::checkout("timed out"))]
    #[case(PoolError::build("bad url"))]
    fn pool_errors_map_to_connection_errors(#[case] error: PoolError) {
        assert!(matches!(
            map_pool_error(error),
            UserStoreError::Connection { .. }
        ));
    }
}
