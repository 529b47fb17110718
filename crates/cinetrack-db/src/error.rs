use cinetrack_auth::UnknownRole;
use cinetrack_core::AppError;
use cinetrack_models::UnknownVariant;
use thiserror::Error;

pub const ACCOUNT_GONE: &str = "Account no longer exists";

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),
    /// The row references an account that no longer exists.
    #[error("owning account does not exist")]
    MissingOwner,
    /// A stored value could not be mapped back to a domain type.
    #[error("corrupt row: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<UnknownVariant> for StoreError {
    fn from(err: UnknownVariant) -> Self {
        StoreError::Corrupt(err.to_string())
    }
}

impl From<UnknownRole> for StoreError {
    fn from(err: UnknownRole) -> Self {
        StoreError::Corrupt(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(message) => AppError::bad_request(message),
            StoreError::MissingOwner => AppError::not_found(ACCOUNT_GONE),
            other => AppError::internal(other),
        }
    }
}

/// Maps constraint violations on insert: unique to [`StoreError::Conflict`],
/// foreign key to [`StoreError::MissingOwner`].
pub(crate) fn classify_write_error(err: sqlx::Error, duplicate: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Conflict(duplicate.to_string())
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            StoreError::MissingOwner
        }
        _ => StoreError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinetrack_core::ErrorKind;

    #[test]
    fn test_conflict_maps_to_bad_request() {
        let err = AppError::from(StoreError::Conflict("Email already exists".into()));
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.message(), "Email already exists");
    }

    #[test]
    fn test_database_errors_are_internal() {
        let err = AppError::from(StoreError::Database(sqlx::Error::RowNotFound));
        assert_eq!(err.kind(), ErrorKind::InternalError);
        assert_eq!(err.message(), "Internal server error");

        let corrupt = AppError::from(StoreError::Corrupt("role".into()));
        assert_eq!(corrupt.kind(), ErrorKind::InternalError);
    }

    #[test]
    fn test_missing_owner_is_not_found() {
        let err = AppError::from(StoreError::MissingOwner);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "Account no longer exists");
    }

    #[test]
    fn test_non_constraint_errors_pass_through() {
        let err = classify_write_error(sqlx::Error::PoolClosed, "dup");
        assert!(matches!(err, StoreError::Database(sqlx::Error::PoolClosed)));
    }
}
