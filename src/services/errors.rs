use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The caller is not signed in as admin.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Submitted form data was rejected.
    #[error("{0}")]
    Form(String),
    /// A value failed a domain type constraint.
    #[error("{0}")]
    TypeConstraint(String),
    /// The store refused a write for lack of privileges.
    #[error(
        "The product store refused the write (permission denied). Make sure the database \
         file and its directory are writable by the server process."
    )]
    PermissionDenied,
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

impl ServiceError {
    /// Machine readable error code reported by the JSON API.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Unauthorized => Some("unauthorized"),
            Self::NotFound => Some("not_found"),
            Self::Form(_) => Some("invalid_form"),
            Self::TypeConstraint(_) => Some("invalid_value"),
            Self::PermissionDenied => Some("permission_denied"),
            Self::Internal => None,
        }
    }
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
