use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::models::{Category, NewCategory, Product, ProductFilters, ProductPage};
use crate::database::store::{CatalogStore, CategoryStore, Pagination, ProductStore, StoreError};

/// Per-operation call counters, for asserting which store paths ran
#[derive(Debug, Default)]
pub struct StoreCalls {
    pub all_products: AtomicUsize,
    pub filtered_products: AtomicUsize,
    pub product_by_code: AtomicUsize,
    pub all_categories: AtomicUsize,
    pub create_category: AtomicUsize,
}

impl StoreCalls {
    fn hit(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// In-memory catalog store mirroring the PostgreSQL semantics: products and
/// categories ordered by code, unique category codes, conjunctive filters.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    products: RwLock<Vec<Product>>,
    categories: RwLock<Vec<Category>>,
    failing: AtomicBool,
    pub calls: StoreCalls,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with products; their categories are registered as well
    pub fn with_products(products: Vec<Product>) -> Self {
        let mut categories: Vec<Category> = Vec::new();
        for product in &products {
            if !categories.iter().any(|c| c.code == product.category.code) {
                categories.push(product.category.clone());
            }
        }
        categories.sort_by(|a, b| a.code.cmp(&b.code));

        let mut products = products;
        products.sort_by(|a, b| a.code.cmp(&b.code));

        Self {
            products: RwLock::new(products),
            categories: RwLock::new(categories),
            ..Self::default()
        }
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for InMemoryCatalogStore {
    async fn all_products(&self) -> Result<Vec<Product>, StoreError> {
        StoreCalls::hit(&self.calls.all_products);
        self.check_available()?;
        Ok(self.products.read().await.clone())
    }

    async fn filtered_products(
        &self,
        filters: &ProductFilters,
        page: Pagination,
    ) -> Result<ProductPage, StoreError> {
        StoreCalls::hit(&self.calls.filtered_products);
        self.check_available()?;

        let products = self.products.read().await;
        let matching: Vec<&Product> = products.iter().filter(|p| filters.matches(p)).collect();
        let total = matching.len() as i64;

        let offset = usize::try_from(page.offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit.max(0)).unwrap_or(usize::MAX);
        let page_products = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|p| Product {
                variants: Vec::new(),
                ..p.clone()
            })
            .collect();

        Ok(ProductPage {
            products: page_products,
            total,
        })
    }

    async fn product_by_code(&self, code: &str) -> Result<Product, StoreError> {
        StoreCalls::hit(&self.calls.product_by_code);
        self.check_available()?;

        self.products
            .read()
            .await
            .iter()
            .find(|p| p.code == code)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("product '{}'", code)))
    }
}

#[async_trait]
impl CategoryStore for InMemoryCatalogStore {
    async fn all_categories(&self) -> Result<Vec<Category>, StoreError> {
        StoreCalls::hit(&self.calls.all_categories);
        self.check_available()?;
        Ok(self.categories.read().await.clone())
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category, StoreError> {
        StoreCalls::hit(&self.calls.create_category);
        self.check_available()?;

        let mut categories = self.categories.write().await;
        if categories.iter().any(|c| c.code == category.code) {
            return Err(StoreError::Duplicate(format!("category '{}' already exists", category.code)));
        }

        let id = categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let created = Category {
            id,
            code: category.code,
            name: category.name,
        };
        let position = categories
            .iter()
            .position(|c| c.code > created.code)
            .unwrap_or(categories.len());
        categories.insert(position, created.clone());
        Ok(created)
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Variant;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn product(id: i64, code: &str, category: &str, price: &str) -> Product {
        Product {
            id,
            code: code.to_string(),
            price: Decimal::from_str(price).unwrap(),
            category: Category {
                id: category.len() as i64,
                code: category.to_string(),
                name: category.to_uppercase(),
            },
            variants: vec![Variant {
                id: id * 10,
                product_id: id,
                name: "Default".to_string(),
                sku: format!("SKU-{}", code),
                price: None,
            }],
        }
    }

    fn sample_store() -> InMemoryCatalogStore {
        InMemoryCatalogStore::with_products(vec![
            product(4, "PROD004", "clothing", "95.50"),
            product(1, "PROD001", "shoes", "19.99"),
            product(3, "PROD003", "accessories", "10.00"),
            product(2, "PROD002", "clothing", "24.99"),
        ])
    }

    fn page(offset: i64, limit: i64) -> Pagination {
        Pagination { offset, limit }
    }

    #[tokio::test]
    async fn filtered_products_are_ordered_by_code() {
        let store = sample_store();
        let result = store
            .filtered_products(&ProductFilters::default(), page(0, 10))
            .await
            .unwrap();
        let codes: Vec<&str> = result.products.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["PROD001", "PROD002", "PROD003", "PROD004"]);
        assert_eq!(result.total, 4);
    }

    #[tokio::test]
    async fn total_ignores_pagination_window() {
        let store = sample_store();
        let result = store
            .filtered_products(&ProductFilters::default(), page(1, 2))
            .await
            .unwrap();
        let codes: Vec<&str> = result.products.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["PROD002", "PROD003"]);
        assert_eq!(result.total, 4);
    }

    #[tokio::test]
    async fn offset_past_end_yields_empty_page() {
        let store = sample_store();
        let result = store
            .filtered_products(&ProductFilters::default(), page(50, 10))
            .await
            .unwrap();
        assert!(result.products.is_empty());
        assert_eq!(result.total, 4);
    }

    #[tokio::test]
    async fn price_filter_is_strictly_less_than() {
        let store = sample_store();
        let filters = ProductFilters {
            category_code: None,
            price_less_than: Some(Decimal::from_str("19.99").unwrap()),
        };
        let result = store.filtered_products(&filters, page(0, 10)).await.unwrap();
        let codes: Vec<&str> = result.products.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["PROD003"]);
    }

    #[tokio::test]
    async fn listing_does_not_carry_variants() {
        let store = sample_store();
        let result = store
            .filtered_products(&ProductFilters::default(), page(0, 1))
            .await
            .unwrap();
        assert!(result.products[0].variants.is_empty());

        let detail = store.product_by_code("PROD001").await.unwrap();
        assert_eq!(detail.variants.len(), 1);
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let store = sample_store();
        let err = store.product_by_code("NOPE").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn create_category_rejects_duplicate_code() {
        let store = sample_store();
        let created = store
            .create_category(NewCategory {
                code: "bags".to_string(),
                name: "Bags".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.code, "bags");

        let err = store
            .create_category(NewCategory {
                code: "bags".to_string(),
                name: "Other".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        let codes: Vec<String> = store
            .all_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.code)
            .collect();
        assert_eq!(codes, vec!["accessories", "bags", "clothing", "shoes"]);
    }

    #[tokio::test]
    async fn failing_store_reports_unavailable() {
        let store = sample_store();
        store.set_failing(true);
        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        assert!(store.all_categories().await.is_err());
        assert_eq!(StoreCalls::count(&store.calls.all_categories), 1);
    }
}
