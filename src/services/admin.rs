use serde::Serialize;

use crate::domain::product::Product;
use crate::dto::products::ProductCard;
use crate::events::CategoryFeed;
use crate::forms::products::AddProductFormPayload;
use crate::repository::{ProductReader, ProductWriter, RepositoryError};
use crate::services::catalog::{fetch_all_products, fetch_categories};

use super::{ServiceError, ServiceResult};

/// Products listed under "recently added" on the dashboard.
pub const RECENT_PRODUCTS_LIMIT: usize = 8;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub categories: Vec<String>,
    pub recent: Vec<ProductCard>,
    pub total_products: usize,
}

pub fn show_dashboard<R>(repo: &R) -> Dashboard
where
    R: ProductReader,
{
    let products = fetch_all_products(repo);

    Dashboard {
        categories: fetch_categories(repo)
            .into_iter()
            .map(|name| name.into_inner())
            .collect(),
        recent: products
            .iter()
            .take(RECENT_PRODUCTS_LIMIT)
            .map(ProductCard::from)
            .collect(),
        total_products: products.len(),
    }
}

/// Stores a validated product and announces the category change.
///
/// Write failures are surfaced. A refusal by the store for lack of
/// privileges becomes [`ServiceError::PermissionDenied`], which carries its
/// own remediation hint.
pub fn create_product<R>(
    payload: AddProductFormPayload,
    repo: &R,
    feed: &CategoryFeed,
) -> ServiceResult<Product>
where
    R: ProductWriter,
{
    let new_product = payload.into_new_product();

    match repo.create_product(&new_product) {
        Ok(product) => {
            log::info!("Created product {} in '{}'", product.id, product.category);
            feed.publish();
            Ok(product)
        }
        Err(RepositoryError::PermissionDenied(message)) => {
            log::error!("Product store refused write: {message}");
            Err(ServiceError::PermissionDenied)
        }
        Err(RepositoryError::ConstraintViolation(message)) => {
            log::error!("Product violates store constraints: {message}");
            Err(ServiceError::Form(format!(
                "The product could not be saved: {message}"
            )))
        }
        Err(e) => {
            log::error!("Failed to create product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::product_at;
    use crate::forms::products::{AddProductForm, CategoryMode};
    use crate::repository::test::{TestRepository, WriteFailure};

    fn payload(category: &str) -> AddProductFormPayload {
        AddProductForm {
            title: "Test".to_string(),
            price: "199.99".to_string(),
            image_url: "http://x/1.jpg".to_string(),
            affiliate_link: "http://x".to_string(),
            rating: String::new(),
            category_mode: CategoryMode::New,
            existing_category: String::new(),
            new_category: category.to_string(),
        }
        .try_into()
        .unwrap()
    }

    #[test]
    fn creating_a_product_publishes_category_change() {
        let repo = TestRepository::default();
        let feed = CategoryFeed::new();

        let created = create_product(payload("New Gear"), &repo, &feed).unwrap();
        assert_eq!(created.title.as_str(), "Test");
        assert_eq!(created.price, 199.99);
        assert_eq!(feed.version(), 1);

        let dashboard = show_dashboard(&repo);
        assert_eq!(dashboard.categories, ["New Gear"]);
        assert_eq!(dashboard.total_products, 1);
    }

    #[test]
    fn permission_denied_is_reported_with_code() {
        let repo = TestRepository::default().with_write_failure(WriteFailure::PermissionDenied);
        let feed = CategoryFeed::new();

        let err = create_product(payload("New Gear"), &repo, &feed).unwrap_err();
        assert_eq!(err, ServiceError::PermissionDenied);
        assert_eq!(err.code(), Some("permission_denied"));
        assert_eq!(feed.version(), 0);
    }

    #[test]
    fn generic_write_failure_is_internal() {
        let repo = TestRepository::default().with_write_failure(WriteFailure::Database);
        let feed = CategoryFeed::new();

        let err = create_product(payload("New Gear"), &repo, &feed).unwrap_err();
        assert_eq!(err, ServiceError::Internal);
        assert!(repo.stored_products().is_empty());
    }

    #[test]
    fn dashboard_shows_latest_products_first() {
        let repo = TestRepository::new(
            (0..10)
                .map(|i| product_at(&format!("p{i}"), "Item", "Misc", 1.0, i))
                .collect(),
        );

        let dashboard = show_dashboard(&repo);
        assert_eq!(dashboard.recent.len(), RECENT_PRODUCTS_LIMIT);
        assert_eq!(dashboard.recent[0].id, "p9");
        assert_eq!(dashboard.total_products, 10);
    }
}
