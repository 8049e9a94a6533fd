//! Click tracking and the aggregated analytics view.

use crate::domain::click::{ClickAnalytics, ClickCount, NewClickEvent};
use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::repository::{ClickReader, ClickWriter, ProductReader};
use crate::services::catalog::fetch_all_products;

/// Title shown for clicks whose product no longer exists.
pub const UNKNOWN_PRODUCT_TITLE: &str = "Unknown product";

/// Records a purchase-intent click. Best effort: failures are logged and
/// swallowed, never retried.
pub fn record_click<R>(repo: &R, product_id: &str, user_agent: &str)
where
    R: ClickWriter,
{
    let product_id = match ProductId::new(product_id) {
        Ok(id) => id,
        Err(e) => {
            log::warn!("Not recording click with invalid product id: {e}");
            return;
        }
    };

    let click = NewClickEvent {
        product_id,
        user_agent: user_agent.to_string(),
    };

    if let Err(e) = repo.record_click(&click) {
        log::error!("Failed to record click for {}: {e}", click.product_id);
    }
}

/// Joins click totals with product titles and ranks them by clicks,
/// keeping the store's order for ties.
pub fn rank_clicks(counts: Vec<ClickCount>, products: &[Product]) -> Vec<ClickAnalytics> {
    let mut rows: Vec<ClickAnalytics> = counts
        .into_iter()
        .map(|count| {
            let product_title = products
                .iter()
                .find(|product| product.id == count.product_id)
                .map(|product| product.title.to_string())
                .unwrap_or_else(|| UNKNOWN_PRODUCT_TITLE.to_string());

            ClickAnalytics {
                product_id: count.product_id,
                product_title,
                total_clicks: count.total_clicks,
                estimated_revenue: None,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.total_clicks.cmp(&a.total_clicks));
    rows
}

/// Raw click totals; empty when the store cannot be read.
pub fn fetch_click_counts<R>(repo: &R) -> Vec<ClickCount>
where
    R: ClickReader,
{
    match repo.count_clicks_by_product() {
        Ok(counts) => counts,
        Err(e) => {
            log::error!("Failed to count clicks: {e}");
            Vec::new()
        }
    }
}

/// Per-product click totals, most clicked first.
pub fn fetch_click_analytics<R>(repo: &R) -> Vec<ClickAnalytics>
where
    R: ClickReader + ProductReader,
{
    let counts = fetch_click_counts(repo);
    if counts.is_empty() {
        return Vec::new();
    }
    rank_clicks(counts, &fetch_all_products(repo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::product;
    use crate::repository::test::TestRepository;

    #[test]
    fn records_click_with_user_agent() {
        let repo = TestRepository::default();
        record_click(&repo, "p1", "Mozilla/5.0");

        let clicks = repo.recorded_clicks();
        assert_eq!(clicks.len(), 1);
        assert_eq!(clicks[0].product_id, "p1");
        assert_eq!(clicks[0].user_agent, "Mozilla/5.0");
    }

    #[test]
    fn click_failures_are_swallowed() {
        let repo = TestRepository::default().with_failing_clicks();
        record_click(&repo, "p1", "agent");
        record_click(&repo, "", "agent");
        assert!(repo.recorded_clicks().is_empty());
    }

    #[test]
    fn analytics_are_ranked_with_title_fallback() {
        let repo = TestRepository::new(vec![
            product("a", "Phone", "Mobiles", 10.0),
            product("b", "Kettle", "Kitchen", 10.0),
        ])
        .with_clicks(&[("a", 2), ("gone", 5), ("b", 2)]);

        let rows = fetch_click_analytics(&repo);
        let summary: Vec<_> = rows
            .iter()
            .map(|row| (row.product_title.as_str(), row.total_clicks))
            .collect();
        assert_eq!(
            summary,
            [("Unknown product", 5), ("Phone", 2), ("Kettle", 2)]
        );
        assert!(rows.iter().all(|row| row.estimated_revenue.is_none()));
    }

    #[test]
    fn analytics_degrade_to_empty() {
        assert!(fetch_click_analytics(&TestRepository::unreachable()).is_empty());
    }
}
