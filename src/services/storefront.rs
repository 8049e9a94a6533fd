use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::domain::compare::ComparedSet;
use crate::domain::listing::{
    self, ListingFilter, Page, RELATED_LIMIT, SUGGESTION_LIMIT, SearchScope, SortMode,
    TRENDING_LIMIT,
};
use crate::domain::offers::comparison_table;
use crate::domain::product::Product;
use crate::domain::types::{AffiliateLink, ProductId};
use crate::dto::products::{OfferDto, ProductCard, SuggestionDto};
use crate::repository::{ClickReader, ClickWriter, ProductReader};
use crate::services::analytics::{fetch_click_counts, rank_clicks, record_click};
use crate::services::catalog::{
    fetch_all_products, fetch_product_by_id, fetch_products_by_category,
};

use super::{ServiceError, ServiceResult};

/// Query parameters shared by the listing pages and the products API.
///
/// Numbers are read leniently: unparsable values are treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub max_price: Option<String>,
    pub page: Option<String>,
}

impl ListingParams {
    fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|page| page.trim().parse().ok())
            .unwrap_or(1)
    }

    /// A price at or above `bound` keeps every product, so it is dropped
    /// instead of comparing against a value the slider may have rounded.
    fn max_price(&self, bound: f64) -> Option<f64> {
        self.max_price
            .as_deref()
            .and_then(|price| price.trim().parse::<f64>().ok())
            .filter(|price| *price < bound)
    }

    fn filter(&self, scope: SearchScope, price_bound: f64) -> ListingFilter {
        let mut filter = ListingFilter::default()
            .search(self.q.clone().unwrap_or_default())
            .scope(scope)
            .sort(SortMode::parse_or_default(self.sort.as_deref()))
            .max_price(self.max_price(price_bound));
        if let Some(category) = &self.category {
            filter = filter.category(category.as_str());
        }
        filter
    }
}

/// Option of the sort dropdown.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Current filter controls, echoed back into the page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilterState {
    pub q: String,
    pub category: String,
    pub sort: &'static str,
    /// Slider position; the bound itself when no price filter is active.
    pub max_price: f64,
    pub price_bound: f64,
    pub sort_options: Vec<SortOption>,
}

impl FilterState {
    fn new(filter: &ListingFilter, price_bound: f64) -> Self {
        Self {
            q: filter.search.clone(),
            category: filter.category_label().to_string(),
            sort: filter.sort.as_str(),
            max_price: filter.max_price.unwrap_or(price_bound),
            price_bound,
            sort_options: SortMode::ALL
                .into_iter()
                .map(|mode| SortOption {
                    value: mode.as_str(),
                    label: mode.label(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub listing: Page<ProductCard>,
    pub filter: FilterState,
    pub trending: Vec<ProductCard>,
    pub deals: Vec<ProductCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryPage {
    pub name: String,
    pub listing: Page<ProductCard>,
    pub filter: FilterState,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    pub product: ProductCard,
    pub related: Vec<ProductCard>,
    /// The product itself and its comparable offers, cheapest first.
    pub offers: Vec<OfferDto>,
}

fn cards(products: &[Product]) -> Vec<ProductCard> {
    products.iter().map(ProductCard::from).collect()
}

/// Filtered page of all products, as served by the products API.
pub fn list_products<R>(params: &ListingParams, repo: &R) -> Page<ProductCard>
where
    R: ProductReader,
{
    let products = fetch_all_products(repo);
    let filter = params.filter(
        SearchScope::TitleAndCategory,
        listing::max_price_bound(&products),
    );
    listing::build_listing(&products, &filter, params.page()).map(ProductCard::from)
}

/// Builds the home page: filtered listing, trending products and the deals
/// added on `now`'s calendar day.
pub fn show_home<R, Tz>(params: &ListingParams, repo: &R, now: &DateTime<Tz>) -> HomePage
where
    R: ProductReader + ClickReader,
    Tz: TimeZone,
{
    let products = fetch_all_products(repo);
    let price_bound = listing::max_price_bound(&products);
    let filter = params.filter(SearchScope::TitleAndCategory, price_bound);

    let ranking = rank_clicks(fetch_click_counts(repo), &products);
    let trending = listing::trending(&products, &ranking, TRENDING_LIMIT);
    let deals = listing::todays_deals(&products, now);

    HomePage {
        listing: listing::build_listing(&products, &filter, params.page()).map(ProductCard::from),
        filter: FilterState::new(&filter, price_bound),
        trending: cards(&trending),
        deals: cards(&deals),
    }
}

/// Builds a category page. Search only looks at titles here.
pub fn show_category<R>(name: &str, params: &ListingParams, repo: &R) -> CategoryPage
where
    R: ProductReader,
{
    let name = name.trim();
    let products = fetch_products_by_category(repo, name);
    let price_bound = listing::max_price_bound(&products);
    let filter = ListingParams {
        category: None,
        ..params.clone()
    }
    .filter(SearchScope::Title, price_bound);

    CategoryPage {
        name: name.to_string(),
        listing: listing::build_listing(&products, &filter, params.page()).map(ProductCard::from),
        filter: FilterState::new(&filter, price_bound),
    }
}

pub fn show_product<R>(id: &str, repo: &R) -> ServiceResult<ProductPage>
where
    R: ProductReader,
{
    let product = fetch_product_by_id(repo, id).ok_or(ServiceError::NotFound)?;
    let products = fetch_all_products(repo);

    Ok(ProductPage {
        related: cards(&listing::related_products(
            &product,
            &products,
            RELATED_LIMIT,
        )),
        offers: comparison_table(&product, &products)
            .into_iter()
            .map(OfferDto::from)
            .collect(),
        product: ProductCard::from(product),
    })
}

/// Records a click for the product and returns where to send the shopper.
/// Click tracking failures never block the redirect.
pub fn purchase<R>(id: &str, user_agent: &str, repo: &R) -> ServiceResult<AffiliateLink>
where
    R: ProductReader + ClickWriter,
{
    let product = fetch_product_by_id(repo, id).ok_or(ServiceError::NotFound)?;
    record_click(repo, product.id.as_str(), user_agent);
    Ok(product.affiliate_link)
}

/// Live-search matches for `query`.
pub fn show_suggestions<R>(query: &str, repo: &R) -> Vec<SuggestionDto>
where
    R: ProductReader,
{
    if query.trim().is_empty() {
        return Vec::new();
    }
    let products = fetch_all_products(repo);
    listing::suggestions(&products, query, SUGGESTION_LIMIT)
        .into_iter()
        .map(SuggestionDto::from)
        .collect()
}

/// Products in the comparison set, in selection order.
pub fn show_comparison<R>(set: &ComparedSet, repo: &R) -> Vec<ProductCard>
where
    R: ProductReader,
{
    if set.is_empty() {
        return Vec::new();
    }
    cards(&set.resolve(&fetch_all_products(repo)))
}

/// Adds an existing product to `set`. Returns `Ok(false)` when the product
/// was already selected or the set is full.
pub fn add_to_comparison<R>(set: &mut ComparedSet, id: &str, repo: &R) -> ServiceResult<bool>
where
    R: ProductReader,
{
    let product = fetch_product_by_id(repo, id).ok_or(ServiceError::NotFound)?;
    Ok(set.add(product.id))
}

pub fn remove_from_comparison(set: &mut ComparedSet, id: &str) -> bool {
    match ProductId::new(id) {
        Ok(id) => set.remove(&id),
        Err(_) => false,
    }
}
