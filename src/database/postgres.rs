use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::database::models::{Category, NewCategory, Product, ProductFilters, ProductPage, Variant};
use crate::database::store::{CatalogStore, CategoryStore, Pagination, ProductStore, StoreError};

const PRODUCT_SELECT: &str = "SELECT p.id, p.code, p.price, \
     c.id AS category_id, c.code AS category_code, c.name AS category_name \
     FROM products p JOIN categories c ON c.id = p.category_id";

const PRODUCT_COUNT: &str =
    "SELECT COUNT(*) FROM products p JOIN categories c ON c.id = p.category_id";

/// Flat row for a product joined with its category
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    code: String,
    price: Decimal,
    category_id: i64,
    category_code: String,
    category_name: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            code: row.code,
            price: row.price,
            category: Category {
                id: row.category_id,
                code: row.category_code,
                name: row.category_name,
            },
            variants: Vec::new(),
        }
    }
}

/// PostgreSQL-backed catalog store
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load variants for the given products, grouped by product id
    async fn variants_for(&self, product_ids: &[i64]) -> Result<HashMap<i64, Vec<Variant>>, StoreError> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let variants = sqlx::query_as::<_, Variant>(
            "SELECT id, product_id, name, sku, price FROM product_variants \
             WHERE product_id = ANY($1) ORDER BY id",
        )
        .bind(product_ids.to_vec())
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<Variant>> = HashMap::new();
        for variant in variants {
            grouped.entry(variant.product_id).or_default().push(variant);
        }
        Ok(grouped)
    }

    async fn attach_variants(&self, mut products: Vec<Product>) -> Result<Vec<Product>, StoreError> {
        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        let mut grouped = self.variants_for(&ids).await?;
        for product in products.iter_mut() {
            product.variants = grouped.remove(&product.id).unwrap_or_default();
        }
        Ok(products)
    }
}

/// Append the WHERE clause for `filters`; conditions are ANDed
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &ProductFilters) {
    if filters.category_code.is_none() && filters.price_less_than.is_none() {
        return;
    }

    builder.push(" WHERE ");
    let mut conditions = builder.separated(" AND ");
    if let Some(code) = &filters.category_code {
        conditions.push("c.code = ").push_bind_unseparated(code.clone());
    }
    if let Some(price) = filters.price_less_than {
        conditions.push("p.price < ").push_bind_unseparated(price);
    }
}

fn map_insert_error(err: sqlx::Error, code: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Duplicate(format!("category '{}' already exists", code));
        }
    }
    StoreError::Sqlx(err)
}

#[async_trait]
impl ProductStore for PgCatalogStore {
    async fn all_products(&self) -> Result<Vec<Product>, StoreError> {
        let sql = format!("{} ORDER BY p.code", PRODUCT_SELECT);
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        self.attach_variants(rows.into_iter().map(Product::from).collect())
            .await
    }

    async fn filtered_products(
        &self,
        filters: &ProductFilters,
        page: Pagination,
    ) -> Result<ProductPage, StoreError> {
        let mut count_query = QueryBuilder::<Postgres>::new(PRODUCT_COUNT);
        push_filters(&mut count_query, filters);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut page_query = QueryBuilder::<Postgres>::new(PRODUCT_SELECT);
        push_filters(&mut page_query, filters);
        page_query
            .push(" ORDER BY p.code LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let rows = page_query
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await?;

        debug!("Filtered products: {} of {} (offset {}, limit {})", rows.len(), total, page.offset, page.limit);

        Ok(ProductPage {
            products: rows.into_iter().map(Product::from).collect(),
            total,
        })
    }

    async fn product_by_code(&self, code: &str) -> Result<Product, StoreError> {
        let sql = format!("{} WHERE p.code = $1", PRODUCT_SELECT);
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("product '{}'", code)))?;

        let mut product = Product::from(row);
        product.variants = self
            .variants_for(&[product.id])
            .await?
            .remove(&product.id)
            .unwrap_or_default();
        Ok(product)
    }
}

#[async_trait]
impl CategoryStore for PgCatalogStore {
    async fn all_categories(&self) -> Result<Vec<Category>, StoreError> {
        let categories = sqlx::query_as::<_, Category>("SELECT id, code, name FROM categories ORDER BY code")
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category, StoreError> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (code, name) VALUES ($1, $2) RETURNING id, code, name",
        )
        .bind(&category.code)
        .bind(&category.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &category.code))
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
