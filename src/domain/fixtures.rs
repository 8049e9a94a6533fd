//! Product builders shared by unit tests.

use chrono::DateTime;

use crate::domain::product::Product;
use crate::domain::types::{
    AffiliateLink, CategoryName, ImageSource, ProductId, ProductPrice, ProductTitle,
};

pub fn product_with_link(
    id: &str,
    title: &str,
    category: &str,
    price: f64,
    link: &str,
) -> Product {
    Product {
        id: ProductId::new(id).unwrap(),
        title: ProductTitle::new(title).unwrap(),
        price: ProductPrice::new(price).unwrap(),
        image_url: ImageSource::new(format!("https://img.example.com/{id}.jpg")).unwrap(),
        category: CategoryName::new(category).unwrap(),
        affiliate_link: AffiliateLink::new(link).unwrap(),
        rating: None,
        created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
    }
}

pub fn product_at(id: &str, title: &str, category: &str, price: f64, secs: i64) -> Product {
    let mut product = product(id, title, category, price);
    product.created_at = DateTime::from_timestamp(secs, 0).unwrap().naive_utc();
    product
}

pub fn product(id: &str, title: &str, category: &str, price: f64) -> Product {
    product_with_link(
        id,
        title,
        category,
        price,
        &format!("https://www.amazon.in/dp/{id}"),
    )
}
