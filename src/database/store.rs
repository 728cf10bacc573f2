use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{Category, NewCategory, Product, ProductFilters, ProductPage};

/// Errors surfaced by catalog store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Offset/limit window applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: i64,
    pub limit: i64,
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every product with category and variants, ordered by code
    async fn all_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Filtered page ordered by code. `total` counts all matches, ignoring
    /// the pagination window.
    async fn filtered_products(
        &self,
        filters: &ProductFilters,
        page: Pagination,
    ) -> Result<ProductPage, StoreError>;

    /// Product with category and variants, or `StoreError::NotFound`
    async fn product_by_code(&self, code: &str) -> Result<Product, StoreError>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn all_categories(&self) -> Result<Vec<Category>, StoreError>;

    async fn create_category(&self, category: NewCategory) -> Result<Category, StoreError>;
}

/// Everything the HTTP layer needs from persistence
#[async_trait]
pub trait CatalogStore: ProductStore + CategoryStore {
    async fn ping(&self) -> Result<(), StoreError>;
}
