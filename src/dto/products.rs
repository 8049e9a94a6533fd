use serde::Serialize;

use crate::domain::click::ClickAnalytics;
use crate::domain::offers::{Marketplace, OfferRow};
use crate::domain::product::Product;

/// Product data prepared for templates and the JSON API.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    pub price: f64,
    /// First listed image.
    pub image: String,
    pub images: Vec<String>,
    pub category: String,
    pub affiliate_link: String,
    pub rating: Option<f64>,
    pub marketplace: &'static str,
    pub created_at: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.to_string(),
            price: product.price.get(),
            image: product.image_url.primary().to_string(),
            images: product
                .image_url
                .urls()
                .into_iter()
                .map(str::to_string)
                .collect(),
            category: product.category.to_string(),
            affiliate_link: product.affiliate_link.to_string(),
            rating: product.rating.map(|rating| rating.get()),
            marketplace: Marketplace::from_link(&product.affiliate_link).label(),
            created_at: product.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

impl From<Product> for ProductCard {
    fn from(product: Product) -> Self {
        Self::from(&product)
    }
}

/// A row of the price comparison table on the product page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OfferDto {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub marketplace: &'static str,
    pub affiliate_link: String,
    pub is_base: bool,
}

impl From<OfferRow> for OfferDto {
    fn from(row: OfferRow) -> Self {
        Self {
            id: row.product.id.into_inner(),
            title: row.product.title.into_inner(),
            price: row.product.price.get(),
            marketplace: row.marketplace,
            affiliate_link: row.product.affiliate_link.into_inner(),
            is_base: row.is_base,
        }
    }
}

/// Entry of the live-search dropdown.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SuggestionDto {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub image: String,
}

impl From<&Product> for SuggestionDto {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.to_string(),
            price: product.price.get(),
            image: product.image_url.primary().to_string(),
        }
    }
}

/// Row of the admin analytics table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClickAnalyticsDto {
    pub product_id: String,
    pub product_title: String,
    pub total_clicks: u64,
    /// Rendered as "N/A" until commission data exists.
    pub estimated_revenue: Option<f64>,
}

impl From<ClickAnalytics> for ClickAnalyticsDto {
    fn from(row: ClickAnalytics) -> Self {
        Self {
            product_id: row.product_id.into_inner(),
            product_title: row.product_title,
            total_clicks: row.total_clicks,
            estimated_revenue: row.estimated_revenue,
        }
    }
}
