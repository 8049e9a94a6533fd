//! Heuristic matching of the same item listed on several marketplaces.
//!
//! Matching is deliberately loose: two products are considered the same
//! offer when they share a category and one normalized title contains the
//! other. No similarity score is computed.

use serde::Serialize;
use url::Url;

use crate::domain::product::Product;

/// Marketplace names removed from titles before comparison.
const MARKETPLACE_TOKENS: [&str; 5] = ["amazon", "flipkart", "meesho", "ajio", "myntra"];

/// Marketplace inferred from an affiliate link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Marketplace {
    Amazon,
    Flipkart,
    Meesho,
    Ajio,
    Myntra,
    Other,
}

impl Marketplace {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Amazon => "Amazon",
            Self::Flipkart => "Flipkart",
            Self::Meesho => "Meesho",
            Self::Ajio => "Ajio",
            Self::Myntra => "Myntra",
            Self::Other => "Marketplace",
        }
    }

    /// Classifies a link by substrings of its host. Links that do not parse
    /// as absolute URLs are `Other`.
    pub fn from_link(link: &str) -> Self {
        let Some(host) = link_host(link) else {
            return Self::Other;
        };
        [
            ("amazon", Self::Amazon),
            ("flipkart", Self::Flipkart),
            ("meesho", Self::Meesho),
            ("ajio", Self::Ajio),
            ("myntra", Self::Myntra),
        ]
        .into_iter()
        .find(|(token, _)| host.contains(token))
        .map(|(_, marketplace)| marketplace)
        .unwrap_or(Self::Other)
    }
}

fn link_host(link: &str) -> Option<String> {
    Url::parse(link.trim())
        .ok()
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
}

/// Lowercases, strips punctuation and marketplace names, and collapses
/// whitespace. Applying it twice gives the same result as applying it once.
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty() && !MARKETPLACE_TOKENS.contains(&word.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn titles_overlap(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a == b || a.contains(b) || b.contains(a))
}

/// Other listings of `base` from the same category.
pub fn comparable_products<'a>(base: &Product, products: &'a [Product]) -> Vec<&'a Product> {
    let base_title = normalize_title(&base.title);
    products
        .iter()
        .filter(|candidate| candidate.id != base.id && candidate.category == base.category)
        .filter(|candidate| titles_overlap(&base_title, &normalize_title(&candidate.title)))
        .collect()
}

/// A row of the price-comparison table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OfferRow {
    pub product: Product,
    pub marketplace: &'static str,
    /// True for the product the table was built for.
    pub is_base: bool,
}

/// The base product and its comparable offers, cheapest first.
pub fn comparison_table(base: &Product, products: &[Product]) -> Vec<OfferRow> {
    let mut rows: Vec<OfferRow> = std::iter::once(base)
        .chain(comparable_products(base, products))
        .map(|product| OfferRow {
            product: product.clone(),
            marketplace: Marketplace::from_link(&product.affiliate_link).label(),
            is_base: product.id == base.id,
        })
        .collect();
    rows.sort_by(|a, b| a.product.price.get().total_cmp(&b.product.price.get()));
    rows
}
