use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Errors returned by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No pooled connection could be obtained.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// The store refused the write for lack of privileges (read-only
    /// database file, revoked grant).
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("database error: {0}")]
    Database(DieselError),
    /// A stored value did not satisfy domain constraints.
    #[error("validation error: {0}")]
    ValidationError(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

fn is_permission_message(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("readonly")
        || message.contains("read-only")
        || message.contains("permission denied")
}

impl From<DieselError> for RepositoryError {
    fn from(error: DieselError) -> Self {
        match &error {
            DieselError::DatabaseError(DatabaseErrorKind::ReadOnlyTransaction, info) => {
                RepositoryError::PermissionDenied(info.message().to_string())
            }
            DieselError::DatabaseError(_, info) if is_permission_message(info.message()) => {
                RepositoryError::PermissionDenied(info.message().to_string())
            }
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation,
                info,
            ) => RepositoryError::ConstraintViolation(info.message().to_string()),
            _ => RepositoryError::Database(error),
        }
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(error: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_read_only_failures() {
        assert!(is_permission_message("attempt to write a readonly database"));
        assert!(is_permission_message("ERROR: permission denied for table products"));
        assert!(!is_permission_message("UNIQUE constraint failed: products.id"));
    }
}
