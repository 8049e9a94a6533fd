pub mod admin;
pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod errors;
pub mod storefront;

pub use errors::{ServiceError, ServiceResult};
