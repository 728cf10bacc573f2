use std::sync::Arc;

use tracing::debug;

use crate::catalog::{CatalogQuery, ProductDetail, ProductListResponse};
use crate::database::store::{CatalogStore, StoreError};

/// Read paths over products: filtered listing and detail with price inheritance
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Filtered, paginated listing with the pre-pagination total
    pub async fn list_products(&self, query: &CatalogQuery) -> Result<ProductListResponse, StoreError> {
        debug!(
            "Listing products offset={} limit={} category={:?} price_lt={:?}",
            query.pagination.offset,
            query.pagination.limit,
            query.filters.category_code,
            query.filters.price_less_than
        );

        let page = self
            .store
            .filtered_products(&query.filters, query.pagination)
            .await?;
        Ok(ProductListResponse::from(&page))
    }

    /// Single product; `StoreError::NotFound` when the code is unknown
    pub async fn product_detail(&self, code: &str) -> Result<ProductDetail, StoreError> {
        let product = self.store.product_by_code(code).await?;
        Ok(ProductDetail::from(&product))
    }

    /// Every product with variants, unpaginated
    pub async fn all_products(&self) -> Result<Vec<ProductDetail>, StoreError> {
        let products = self.store.all_products().await?;
        Ok(products.iter().map(ProductDetail::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::{InMemoryCatalogStore, StoreCalls};
    use crate::database::models::{Category, Product, Variant};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn product(id: i64, code: &str, category: &str, price: &str) -> Product {
        Product {
            id,
            code: code.to_string(),
            price: Decimal::from_str(price).unwrap(),
            category: Category {
                id,
                code: category.to_string(),
                name: category.to_string(),
            },
            variants: vec![Variant {
                id,
                product_id: id,
                name: "Only".to_string(),
                sku: format!("{}-A", code),
                price: Some(Decimal::ZERO),
            }],
        }
    }

    fn service() -> (CatalogService, Arc<InMemoryCatalogStore>) {
        let store = Arc::new(InMemoryCatalogStore::with_products(vec![
            product(1, "PROD001", "shoes", "19.99"),
            product(2, "PROD002", "clothing", "24.99"),
            product(3, "PROD003", "accessories", "10.00"),
            product(4, "PROD004", "clothing", "95.50"),
        ]));
        (CatalogService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn category_and_price_filters_combine() {
        let (service, _) = service();
        let query = CatalogQuery::from_query_string(Some("category=clothing&price_lt=30"));
        let response = service.list_products(&query).await.unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.products.len(), 1);
        assert_eq!(response.products[0].code, "PROD002");
    }

    #[tokio::test]
    async fn detail_inherits_zero_variant_price() {
        let (service, _) = service();
        let detail = service.product_detail("PROD004").await.unwrap();
        assert_eq!(detail.variants[0].price, Decimal::from_str("95.50").unwrap());
    }

    #[tokio::test]
    async fn unknown_product_is_not_found_without_listing() {
        let (service, store) = service();
        let err = service.product_detail("PROD999").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(StoreCalls::count(&store.calls.product_by_code), 1);
        assert_eq!(StoreCalls::count(&store.calls.filtered_products), 0);
        assert_eq!(StoreCalls::count(&store.calls.all_products), 0);
    }

    #[tokio::test]
    async fn all_products_maps_every_product() {
        let (service, _) = service();
        let products = service.all_products().await.unwrap();
        assert_eq!(products.len(), 4);
        assert!(products.iter().all(|p| p.variants.len() == 1));
    }
}
