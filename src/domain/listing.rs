//! Filter, sort and paginate pipeline behind the Home and Category pages.
//!
//! Everything here is a pure function of the full in-memory product list and
//! the current filter state. Callers fetch the whole table once and rerun the
//! pipeline whenever the filter changes.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::domain::click::ClickAnalytics;
use crate::domain::product::Product;
use crate::domain::types::TypeConstraintError;

/// Products shown per listing page.
pub const PAGE_SIZE: usize = 8;
/// Price slider bound used when no products are loaded.
pub const FALLBACK_MAX_PRICE: f64 = 10_000.0;
/// Category sentinel that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";
pub const TRENDING_LIMIT: usize = 5;
pub const SUGGESTION_LIMIT: usize = 6;
pub const RELATED_LIMIT: usize = 4;
/// Quiet period the live-search box waits for before querying suggestions.
pub const SEARCH_DEBOUNCE_MS: u64 = 250;

/// Ordering applied to a filtered listing. Every mode sorts stably.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Newest,
    Oldest,
    PriceLow,
    PriceHigh,
    Rating,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::Newest,
        SortMode::Oldest,
        SortMode::PriceLow,
        SortMode::PriceHigh,
        SortMode::Rating,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest first",
            Self::Oldest => "Oldest first",
            Self::PriceLow => "Price: low to high",
            Self::PriceHigh => "Price: high to low",
            Self::Rating => "Top rated",
        }
    }

    /// Parses a query-string value; unknown or missing values mean `Newest`.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Newest => b.created_at.cmp(&a.created_at),
            Self::Oldest => a.created_at.cmp(&b.created_at),
            Self::PriceLow => a.price.get().total_cmp(&b.price.get()),
            Self::PriceHigh => b.price.get().total_cmp(&a.price.get()),
            Self::Rating => b.rating_or_zero().total_cmp(&a.rating_or_zero()),
        }
    }
}

impl FromStr for SortMode {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == value.trim())
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("sort mode: {value}")))
    }
}

/// Which product fields the search text is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchScope {
    /// Home page search: title and category.
    #[default]
    TitleAndCategory,
    /// Category page search: title only.
    Title,
}

/// Filter state of a listing page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub search: String,
    pub scope: SearchScope,
    /// `None` means every category.
    pub category: Option<String>,
    pub sort: SortMode,
    /// Inclusive upper price bound; `None` disables the price filter.
    pub max_price: Option<f64>,
}

impl ListingFilter {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    /// Restricts to one category. Blank values and the `All` sentinel clear
    /// the restriction.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        let trimmed = category.trim();
        self.category = if trimmed.is_empty() || trimmed == ALL_CATEGORIES {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn max_price(mut self, max_price: Option<f64>) -> Self {
        self.max_price = max_price.filter(|value| value.is_finite());
        self
    }

    /// Selected category for display, using the `All` sentinel.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(ALL_CATEGORIES)
    }

    fn matches(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() {
            let haystack = match self.scope {
                SearchScope::Title => product.title.to_lowercase(),
                SearchScope::TitleAndCategory => {
                    format!("{} {}", product.title, product.category).to_lowercase()
                }
            };
            if !haystack.contains(&needle) {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if product.category.as_str() != category {
                return false;
            }
        }

        match self.max_price {
            Some(max_price) => product.price.get() <= max_price,
            None => true,
        }
    }

    /// Filters and sorts `products`, keeping input order for equal keys.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut items: Vec<Product> = products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect();
        items.sort_by(|a, b| self.sort.compare(a, b));
        items
    }
}

/// One page of a listing together with the navigation state.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total_items: self.total_items,
            has_prev: self.has_prev,
            has_next: self.has_next,
        }
    }
}

/// Number of pages needed for `count` items; never less than one.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE).max(1)
}

/// Slices `items` into the requested page, clamping out-of-range pages.
pub fn paginate<T>(items: Vec<T>, page: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = total_pages(total_items);
    let page = page.clamp(1, total_pages);
    let items = items
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    Page {
        items,
        page,
        total_pages,
        total_items,
        has_prev: page > 1,
        has_next: page < total_pages,
    }
}

/// Runs the full pipeline: filter, sort, paginate.
pub fn build_listing(products: &[Product], filter: &ListingFilter, page: usize) -> Page<Product> {
    paginate(filter.apply(products), page)
}

/// Upper bound for the price slider.
pub fn max_price_bound(products: &[Product]) -> f64 {
    products
        .iter()
        .map(|product| product.price.get())
        .reduce(f64::max)
        .unwrap_or(FALLBACK_MAX_PRICE)
}

/// Products created on the same calendar day as `now`, in `now`'s time zone.
///
/// Recomputed from `now` on every call, so the set rolls over at local
/// midnight without any cache to invalidate.
pub fn todays_deals<Tz: TimeZone>(products: &[Product], now: &DateTime<Tz>) -> Vec<Product> {
    let today = now.date_naive();
    let zone = now.timezone();
    products
        .iter()
        .filter(|product| {
            Utc.from_utc_datetime(&product.created_at)
                .with_timezone(&zone)
                .date_naive()
                == today
        })
        .cloned()
        .collect()
}

/// Top ranked products that are still present in `products`, in ranking order.
pub fn trending(products: &[Product], ranking: &[ClickAnalytics], limit: usize) -> Vec<Product> {
    ranking
        .iter()
        .take(limit)
        .filter_map(|entry| {
            products
                .iter()
                .find(|product| product.id == entry.product_id)
                .cloned()
        })
        .collect()
}

/// Title matches for the live-search dropdown.
pub fn suggestions<'a>(products: &'a [Product], query: &str, limit: usize) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|product| product.title.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

/// Other products from the same category.
pub fn related_products(product: &Product, products: &[Product], limit: usize) -> Vec<Product> {
    products
        .iter()
        .filter(|item| item.category == product.category && item.id != product.id)
        .take(limit)
        .cloned()
        .collect()
}
