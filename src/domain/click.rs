use serde::{Deserialize, Serialize};

use crate::domain::types::ProductId;

/// A purchase-intent click to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClickEvent {
    pub product_id: ProductId,
    pub user_agent: String,
}

/// Raw click total for one product as counted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickCount {
    pub product_id: ProductId,
    pub total_clicks: u64,
}

/// Click totals joined with product titles for the analytics table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClickAnalytics {
    pub product_id: ProductId,
    pub product_title: String,
    pub total_clicks: u64,
    /// Placeholder until commission data is available; always `None`.
    pub estimated_revenue: Option<f64>,
}
