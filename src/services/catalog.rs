//! Read paths over the product store.
//!
//! Every function here degrades instead of failing: repository errors are
//! logged and an empty result is returned so pages still render.

use crate::domain::product::Product;
use crate::domain::types::{CategoryName, ProductId};
use crate::repository::{ProductListQuery, ProductReader};

/// All products, newest first.
pub fn fetch_all_products<R>(repo: &R) -> Vec<Product>
where
    R: ProductReader,
{
    match repo.list_products(ProductListQuery::default()) {
        Ok(products) => products,
        Err(e) => {
            log::error!("Failed to list products: {e}");
            Vec::new()
        }
    }
}

/// Products whose category equals `category` exactly, newest first.
pub fn fetch_products_by_category<R>(repo: &R, category: &str) -> Vec<Product>
where
    R: ProductReader,
{
    match repo.list_products(ProductListQuery::default().category(category)) {
        Ok(products) => products,
        Err(e) => {
            log::error!("Failed to list products in category '{category}': {e}");
            Vec::new()
        }
    }
}

/// Looks a product up by id. Unknown ids, malformed ids and store failures
/// all yield `None`.
pub fn fetch_product_by_id<R>(repo: &R, id: &str) -> Option<Product>
where
    R: ProductReader,
{
    let id = ProductId::new(id).ok()?;
    match repo.get_product_by_id(&id) {
        Ok(product) => product,
        Err(e) => {
            log::error!("Failed to get product {id}: {e}");
            None
        }
    }
}

/// Distinct category names, sorted ascending.
pub fn fetch_categories<R>(repo: &R) -> Vec<CategoryName>
where
    R: ProductReader,
{
    match repo.list_categories() {
        Ok(categories) => normalize_categories(categories),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Vec::new()
        }
    }
}

pub(crate) fn normalize_categories(mut categories: Vec<CategoryName>) -> Vec<CategoryName> {
    categories.sort();
    categories.dedup();
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{product, product_at};
    use crate::repository::test::TestRepository;

    #[test]
    fn lists_newest_first() {
        let repo = TestRepository::new(vec![
            product_at("old", "Old", "Mobiles", 10.0, 100),
            product_at("new", "New", "Mobiles", 10.0, 200),
        ]);

        let ids: Vec<_> = fetch_all_products(&repo)
            .into_iter()
            .map(|p| p.id.into_inner())
            .collect();
        assert_eq!(ids, ["new", "old"]);
    }

    #[test]
    fn filters_by_exact_category() {
        let repo = TestRepository::new(vec![
            product("1", "Phone", "Mobiles", 10.0),
            product("2", "Cover", "Mobiles Accessories", 5.0),
        ]);

        let items = fetch_products_by_category(&repo, "Mobiles");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "1");
        assert!(fetch_products_by_category(&repo, "Toys").is_empty());
    }

    #[test]
    fn reads_degrade_to_empty_results() {
        let repo = TestRepository::unreachable();
        assert!(fetch_all_products(&repo).is_empty());
        assert!(fetch_products_by_category(&repo, "Mobiles").is_empty());
        assert!(fetch_categories(&repo).is_empty());
        assert_eq!(fetch_product_by_id(&repo, "1"), None);
    }

    #[test]
    fn missing_and_blank_ids_are_none() {
        let repo = TestRepository::new(vec![product("1", "Phone", "Mobiles", 10.0)]);
        assert!(fetch_product_by_id(&repo, "1").is_some());
        assert_eq!(fetch_product_by_id(&repo, "2"), None);
        assert_eq!(fetch_product_by_id(&repo, "  "), None);
    }

    #[test]
    fn categories_are_sorted_and_unique() {
        let repo = TestRepository::new(vec![
            product("1", "Phone", "Mobiles", 10.0),
            product("2", "Kettle", "Kitchen", 10.0),
            product("3", "Charger", "Mobiles", 10.0),
        ]);

        let names: Vec<_> = fetch_categories(&repo)
            .into_iter()
            .map(CategoryName::into_inner)
            .collect();
        assert_eq!(names, ["Kitchen", "Mobiles"]);
    }
}
