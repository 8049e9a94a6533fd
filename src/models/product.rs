use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::{
    AffiliateLink, CategoryName, ImageSource, ProductId, ProductPrice, ProductRating,
    ProductTitle, TypeConstraintError,
};

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub image_url: String,
    pub category: String,
    pub affiliate_link: String,
    pub rating: Option<f64>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub image_url: String,
    pub category: String,
    pub affiliate_link: String,
    pub rating: Option<f64>,
    pub created_at: NaiveDateTime,
}

impl NewProduct {
    /// Stamps a domain draft with the store-assigned id and creation time.
    pub fn from_domain(product: &DomainNewProduct, id: String, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            title: product.title.as_str().to_string(),
            price: product.price.get(),
            image_url: product.image_url.as_str().to_string(),
            category: product.category.as_str().to_string(),
            affiliate_link: product.affiliate_link.as_str().to_string(),
            rating: product.rating.map(ProductRating::get),
            created_at,
        }
    }
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(product.id)?,
            title: ProductTitle::new(product.title)?,
            price: ProductPrice::new(product.price)?,
            image_url: ImageSource::new(product.image_url)?,
            category: CategoryName::new(product.category)?,
            affiliate_link: AffiliateLink::new(product.affiliate_link)?,
            rating: product.rating.map(ProductRating::new).transpose()?,
            created_at: product.created_at,
        })
    }
}
