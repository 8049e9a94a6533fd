use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AffiliateLink, CategoryName, ImageSource, ProductId, ProductPrice, ProductRating,
    ProductTitle,
};

/// An affiliate product listed in the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub title: ProductTitle,
    pub price: ProductPrice,
    pub image_url: ImageSource,
    pub category: CategoryName,
    pub affiliate_link: AffiliateLink,
    #[serde(default)]
    pub rating: Option<ProductRating>,
    /// Insert time in UTC.
    pub created_at: NaiveDateTime,
}

impl Product {
    /// Rating used for ordering; unrated products count as zero.
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.map(ProductRating::get).unwrap_or(0.0)
    }
}

/// Information required to create a new [`Product`]. The store assigns the
/// id and creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub title: ProductTitle,
    pub price: ProductPrice,
    pub image_url: ImageSource,
    pub category: CategoryName,
    pub affiliate_link: AffiliateLink,
    pub rating: Option<ProductRating>,
}
