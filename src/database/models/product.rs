use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::category::Category;

/// A product with its category joined in.
///
/// `variants` is only populated by the detail and list-all reads; the
/// filtered listing leaves it empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub code: String,
    pub price: Decimal,
    pub category: Category,
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Variant {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub sku: String,
    /// Absent or zero means the variant inherits the product price
    pub price: Option<Decimal>,
}

/// Conjunctive filters for the product listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    pub category_code: Option<String>,
    pub price_less_than: Option<Decimal>,
}

impl ProductFilters {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(code) = &self.category_code {
            if &product.category.code != code {
                return false;
            }
        }
        if let Some(limit) = self.price_less_than {
            if product.price >= limit {
                return false;
            }
        }
        true
    }
}

/// One page of the filtered listing plus the pre-pagination match count
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: i64,
}
