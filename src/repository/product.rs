use std::collections::BTreeSet;

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{CategoryName, ProductId};
use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct};
use crate::repository::{
    DieselRepository, ProductListQuery, ProductReader, ProductWriter, RepositoryResult,
};

/// Converts loaded rows, skipping any that violate domain constraints so one
/// malformed row cannot blank a whole listing.
fn into_domain(rows: Vec<DbProduct>) -> Vec<Product> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id.clone();
            match Product::try_from(row) {
                Ok(product) => Some(product),
                Err(e) => {
                    log::warn!("Skipping product {id} with invalid data: {e}");
                    None
                }
            }
        })
        .collect()
}

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let mut items = products::table
            .select(DbProduct::as_select())
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category) = &query.category {
            items = items.filter(products::category.eq(category.as_str()));
        }

        let rows = items
            .order(products::created_at.desc())
            .load::<DbProduct>(&mut conn)?;

        Ok(into_domain(rows))
    }

    fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let product = products::table
            .filter(products::id.eq(id.as_str()))
            .select(DbProduct::as_select())
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Product::try_from).transpose()?)
    }

    fn list_categories(&self) -> RepositoryResult<Vec<CategoryName>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let names = products::table
            .select(products::category)
            .distinct()
            .load::<String>(&mut conn)?;

        // Trim-equal names collapse into one entry.
        let categories: BTreeSet<CategoryName> = names
            .into_iter()
            .filter_map(|name| CategoryName::new(name).ok())
            .collect();

        Ok(categories.into_iter().collect())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let row = DbNewProduct::from_domain(
            product,
            uuid::Uuid::new_v4().to_string(),
            Utc::now().naive_utc(),
        );

        let created = diesel::insert_into(products::table)
            .values(&row)
            .returning(DbProduct::as_returning())
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.try_into()?)
    }
}
