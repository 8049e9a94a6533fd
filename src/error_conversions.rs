//! Error conversion glue between forms and services.
//!
//! The form layer must not depend on service error types, so the
//! conversions live here and are only compiled with the `server` feature.

use crate::forms::products::ApiProductFormError;
use crate::services::ServiceError;

impl From<ApiProductFormError> for ServiceError {
    fn from(val: ApiProductFormError) -> Self {
        match val {
            ApiProductFormError::Validation(_) => ServiceError::Form(val.to_string()),
            ApiProductFormError::TypeConstraint(_) => ServiceError::TypeConstraint(val.to_string()),
        }
    }
}
