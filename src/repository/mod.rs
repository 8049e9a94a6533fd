use crate::db::{DbConnection, DbPool};
use crate::domain::click::{ClickCount, NewClickEvent};
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{CategoryName, ProductId};

pub mod click;
pub mod errors;
pub mod product;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Exact category match.
    pub category: Option<String>,
}

impl ProductListQuery {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Read-only operations for products and the categories derived from them.
pub trait ProductReader {
    /// List products newest first.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
    /// Retrieve a product by its identifier.
    fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;
    /// Distinct category names referenced by products.
    fn list_categories(&self) -> RepositoryResult<Vec<CategoryName>>;
}

/// Write operations for products.
pub trait ProductWriter {
    /// Insert a product and return the stored record with its assigned id.
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
}

/// Aggregated reads over recorded clicks.
pub trait ClickReader {
    /// Click totals grouped by product.
    fn count_clicks_by_product(&self) -> RepositoryResult<Vec<ClickCount>>;
}

/// Click recording.
pub trait ClickWriter {
    fn record_click(&self, click: &NewClickEvent) -> RepositoryResult<()>;
}
